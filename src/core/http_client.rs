use std::time::Duration;

use reqwest::{Client, Response};

use crate::core::error::AppError;

const BODY_SNIPPET_CHARS: usize = 512;

/// `timeout_secs` of `None` leaves outbound calls unbounded.
pub fn build_http_client(
    disable_proxy: bool,
    timeout_secs: Option<u64>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent("vote-right-server/0.1");

    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    if disable_proxy {
        builder = builder.no_proxy();
    }

    builder.build()
}

/// Passes 2xx responses through; anything else becomes an upstream error carrying
/// the status and the start of the body.
pub async fn ensure_success(response: Response, upstream: &str) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read body>".to_string());
    let body_snippet = text.chars().take(BODY_SNIPPET_CHARS).collect::<String>();

    Err(AppError::upstream(format!(
        "{upstream} responded with {status}: {body_snippet}"
    )))
}
