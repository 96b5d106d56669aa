use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ModelError;

pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, ModelError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ModelError::Client(e.to_string()))
}

/// Send a request and decode a 2xx JSON body.
pub(crate) async fn send_json<R: DeserializeOwned>(
    request: RequestBuilder,
    timeout: Duration,
) -> Result<R, ModelError> {
    let response = request
        .send()
        .await
        .map_err(|e| ModelError::from_send(e, timeout))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ModelError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<R>()
        .await
        .map_err(|e| ModelError::ResponseParse(e.to_string()))
}
