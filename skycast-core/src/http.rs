use reqwest::Response;

use crate::error::{Result, WeatherError};

/// Read a response body, turning a non-success status into `UpstreamUnavailable`.
pub(crate) async fn success_body(res: Response, service: &str) -> Result<String> {
    let status = res.status();
    let body = res.text().await.map_err(|e| {
        WeatherError::UpstreamUnavailable(format!("Failed to read {service} response body: {e}"))
    })?;

    if !status.is_success() {
        tracing::warn!(%status, service, "upstream request failed");
        return Err(WeatherError::UpstreamUnavailable(format!(
            "{service} request failed with status {status}: {}",
            truncate_body(&body),
        )));
    }

    Ok(body)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
