//! Request execution shared by the provider clients.
//!
//! Every provider call goes through [`send`], so timeouts and refusals are
//! classified the same way whichever backend is selected.

use std::time::Duration;

use crate::error::DispatchError;

/// Send a prepared request bounded by `timeout` and return the response if
/// its status is a success.
///
/// An elapsed timeout becomes [`DispatchError::Timeout`], any other
/// transport failure [`DispatchError::Transport`], and every non-success
/// status (429 included) [`DispatchError::Status`] carrying the body text.
pub async fn send(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<reqwest::Response, DispatchError> {
    let resp = request
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| DispatchError::from_transport(e, timeout))?;

    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let status = status.as_u16();
    // The body is diagnostic only; an unreadable one is reported as empty.
    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(status, "backend refused request");
    Err(DispatchError::Status { status, body })
}
