use super::Exchange;

/// Renders a completed exchange for display. The body is pretty-printed
/// when it parses as JSON and echoed raw otherwise.
#[must_use]
pub fn response_lines(exchange: &Exchange) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("Status:   {}", exchange.status));
    lines.push(format!(
        "Duration: {}ms",
        u64::try_from(exchange.latency.as_millis()).unwrap_or(u64::MAX)
    ));

    match serde_json::from_slice::<serde_json::Value>(&exchange.body) {
        Err(_) => {
            lines.push("Response (raw):".to_owned());
            lines.push(String::from_utf8_lossy(&exchange.body).into_owned());
        }
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Err(_) => {
                lines.push("Response (raw):".to_owned());
                lines.push(String::from_utf8_lossy(&exchange.body).into_owned());
            }
            Ok(pretty) => {
                lines.push("Response (JSON):".to_owned());
                lines.push(pretty);
            }
        },
    }

    lines
}
