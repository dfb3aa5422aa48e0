use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::warn;

use crate::error::{AppError, AppResult, EnvError};

/// Key-value environment loaded from a JSON file, used to fill `{{name}}`
/// placeholders in URLs, bodies, header values and credentials.
#[derive(Debug, Default, Clone)]
pub struct Env {
    vars: BTreeMap<String, String>,
}

impl Env {
    /// Loads an environment from a JSON file of the form
    /// `{"base_url": "https://api.example.com", "auth_token": "secret"}`.
    /// No path yields an empty environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a flat JSON
    /// string map.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|err| {
            AppError::from(EnvError::Read {
                path: PathBuf::from(path),
                source: err,
            })
        })?;
        let vars: BTreeMap<String, String> = serde_json::from_str(&content).map_err(|err| {
            AppError::from(EnvError::Parse {
                path: PathBuf::from(path),
                source: err,
            })
        })?;
        Ok(Self { vars })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Replaces every `{{name}}` placeholder with the mapped value. Unknown
    /// names keep the placeholder verbatim and log a warning.
    #[must_use]
    pub fn interpolate(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut rest = input;
        loop {
            let Some(open) = rest.find("{{") else {
                output.push_str(rest);
                break;
            };
            let Some(prefix) = rest.get(..open) else {
                output.push_str(rest);
                break;
            };
            output.push_str(prefix);
            let Some(tail) = rest.get(open..) else {
                break;
            };
            let Some(close) = tail.find("}}") else {
                output.push_str(tail);
                break;
            };
            let placeholder_end = close.saturating_add(2);
            let Some(placeholder) = tail.get(..placeholder_end) else {
                output.push_str(tail);
                break;
            };
            let name = tail.get(2..close).unwrap_or_default().trim();
            match self.vars.get(name) {
                Some(value) => output.push_str(value),
                None => {
                    warn!("Environment variable '{}' not found, keeping placeholder", name);
                    output.push_str(placeholder);
                }
            }
            let Some(next) = tail.get(placeholder_end..) else {
                break;
            };
            rest = next;
        }
        output
    }

    /// Interpolates header values, leaving header names untouched.
    #[must_use]
    pub fn interpolate_headers(&self, headers: &[(String, String)]) -> Vec<(String, String)> {
        headers
            .iter()
            .map(|(key, value)| (key.clone(), self.interpolate(value)))
            .collect()
    }
}
