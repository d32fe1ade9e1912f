use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::broadcast;

use super::*;
use crate::payment::{Classifier, Direction};

struct RefusingSink;

impl NotificationSink for RefusingSink {
    fn show(&self, _notification: PaymentNotification) -> Result<(), NotificationError> {
        Err(NotificationError::Rejected("permission denied".into()))
    }
}

fn event(id: &str, text: &str) -> PaymentEvent {
    PaymentEvent {
        id: id.into(),
        amount: Decimal::from(500),
        sender: "Ravi".into(),
        direction: Classifier::default().classify(text),
        raw_text: text.into(),
        timestamp: Utc::now(),
    }
}

fn tray_notifier(locale: Locale) -> (Notifier, Arc<TraySink>) {
    let (tx, _) = broadcast::channel(16);
    let tray = Arc::new(TraySink::new(tx));
    let notifier = Notifier::new(locale, AlertStyle::default(), tray.clone());
    (notifier, tray)
}

#[test]
fn credit_alert_fields() {
    let (notifier, _) = tray_notifier(Locale::English);
    let alert = notifier.build(&event("a1", "Rs.500 credited to your account"));

    assert_eq!(alert.title, "💰 Payment received");
    assert!(alert.body.contains("500"));
    assert!(alert.body.contains("Ravi"));
    assert_eq!(alert.tag, "payment-a1");
    assert!(alert.renotify);
    assert_eq!(alert.vibrate, vec![200, 100, 200]);
    assert_eq!(alert.icon, "/icon-192x192.png");
    assert_eq!(alert.badge, "/icon-72x72.png");
    assert_eq!(alert.data.url, "/");
    assert_eq!(alert.data.payment_id, "a1");
    assert_eq!(alert.data.amount, Decimal::from(500));
    assert_eq!(alert.data.sender, "Ravi");
}

#[test]
fn debit_alert_uses_debit_copy() {
    let (notifier, _) = tray_notifier(Locale::Hindi);
    let debit = event("d1", "Rs.500 debited");
    assert_eq!(debit.direction, Direction::Debit);

    let alert = notifier.build(&debit);
    assert_eq!(alert.title, "💸 पैसे भेजे गए");
    assert!(alert.body.contains("500"));
}

#[test]
fn repeat_event_is_not_alerted_again() {
    let (tx, mut rx) = broadcast::channel(16);
    let tray = Arc::new(TraySink::new(tx));
    let notifier = Notifier::new(Locale::Hindi, AlertStyle::default(), tray.clone());
    let e = event("a1", "credited");

    assert_eq!(notifier.notify(&e).unwrap(), Delivery::Shown);
    assert_eq!(notifier.notify(&e).unwrap(), Delivery::AlreadyShown);
    assert_eq!(tray.snapshot().len(), 1);
    assert!(notifier.has_seen("a1"));

    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}

#[test]
fn refused_alert_is_not_recorded() {
    let notifier = Notifier::new(Locale::Hindi, AlertStyle::default(), Arc::new(RefusingSink));

    let err = notifier.notify(&event("a1", "credited")).unwrap_err();
    assert!(matches!(err, NotificationError::Rejected(_)));
    assert!(!notifier.has_seen("a1"));
    assert!(notifier.notify(&event("a1", "credited")).is_err());
}
