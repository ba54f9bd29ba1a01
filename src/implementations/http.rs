use log::{ debug, warn };
use reqwest::{ Client, RequestBuilder };

use crate::config::HttpOptions;
use crate::errors::{ CheckError, CheckResult, RecoverableError };

/// Build the HTTP client shared by one source or embedder
pub fn build_client(options: &HttpOptions) -> CheckResult<Client> {
    Client::builder()
        .timeout(options.timeout)
        .user_agent(concat!("claimcheck/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| CheckError::Request(format!("Failed to create HTTP client: {}", e)))
}

/// Send the request built by `make_request` and return the response body.
///
/// Transient failures (timeouts, refused connections, 502/503/504) are retried
/// up to `options.retries` times; anything else is returned immediately.
pub async fn send_with_retry<F>(
    options: &HttpOptions,
    target: &str,
    make_request: F
) -> CheckResult<String>
    where F: Fn() -> RequestBuilder
{
    let mut attempt = 0;
    loop {
        match send_once(make_request(), target).await {
            Ok(body) => {
                return Ok(body);
            }
            Err(err) if err.is_recoverable() && attempt < options.retries => {
                attempt += 1;
                warn!(
                    "Transient failure calling {}: {} (retry {}/{})",
                    target,
                    err,
                    attempt,
                    options.retries
                );
                tokio::time::sleep(options.retry_delay).await;
            }
            Err(err) => {
                return Err(err);
            }
        }
    }
}

async fn send_once(request: RequestBuilder, target: &str) -> CheckResult<String> {
    debug!("Sending request to {}", target);

    let response = request.send().await.map_err(|e| {
        let error_msg = format!("Network error when calling {}: {}", target, e);
        warn!("{}", error_msg);
        if e.is_timeout() {
            warn!("Request timed out");
            return CheckError::Network(error_msg);
        }
        if e.is_connect() {
            warn!("Connection error - check network connectivity");
            return CheckError::Network(error_msg);
        }
        CheckError::Request(error_msg)
    })?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let error_text = response
            .text().await
            .unwrap_or_else(|_| "Failed to get error message".to_string());
        let error_text: String = error_text.chars().take(300).collect();

        warn!("{} returned HTTP {} - {}", target, status, error_text);
        return Err(CheckError::Http {
            status,
            message: error_text,
        });
    }

    let body = response.text().await.map_err(|e| {
        warn!("Failed to get response text: {}", e);
        CheckError::Network(format!("Failed to read response from {}: {}", target, e))
    })?;

    debug!("Response length: {} characters", body.len());
    Ok(body)
}
