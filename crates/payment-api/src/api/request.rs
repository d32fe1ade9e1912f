use serde::Serialize;

use super::*;

impl PaymentApiClient {
    /// Execute a GET request and return the body of a successful response.
    pub(super) async fn get_text(&self, url: &str) -> Result<String, ApiError> {
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }

    /// Execute a POST request with a JSON body.
    pub(super) async fn post_json(
        &self,
        url: &str,
        body: &impl Serialize,
    ) -> Result<String, ApiError> {
        let resp = self.http.post(url).json(body).send().await?;

        let status = resp.status();
        let resp_body = resp.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: resp_body,
            });
        }

        Ok(resp_body)
    }
}
