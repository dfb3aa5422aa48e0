//! Command handlers behind the CLI subcommands.
mod collection;
mod request;
mod stress;

#[cfg(test)]
mod tests;

pub use collection::run_collection;
pub use request::run_request;
pub use stress::run_stress;

use url::Url;

use crate::envfile::Env;
use crate::error::{AppError, AppResult, ValidationError};

/// Interpolates and scheme-defaults a raw URL, failing fast when the result
/// is not a parseable URL.
pub(crate) fn resolve_url(raw: &str, env: &Env) -> AppResult<String> {
    let interpolated = env.interpolate(raw);
    let normalized = normalize_url(&interpolated);
    if let Err(err) = Url::parse(&normalized) {
        return Err(AppError::validation(ValidationError::InvalidUrl {
            url: normalized,
            source: err,
        }));
    }
    Ok(normalized)
}

fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_owned()
    } else {
        format!("https://{}", url)
    }
}

/// Non-empty bodies must be valid JSON before any request is sent.
pub(crate) fn validate_json_body(body: &str) -> AppResult<()> {
    if body.is_empty() {
        return Ok(());
    }
    serde_json::from_str::<serde_json::Value>(body)
        .map(drop)
        .map_err(|err| AppError::validation(ValidationError::InvalidBodyJson { source: err }))
}
