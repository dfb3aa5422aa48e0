use std::time::Duration;

use reqwest::{StatusCode, header};

use super::executor::HttpExecutor;
use super::{Exchange, RequestSpec, authorization_value, response_lines};
use crate::args::HttpMethod;

fn base_spec(url: &str) -> RequestSpec {
    RequestSpec {
        method: HttpMethod::Post,
        url: url.to_owned(),
        headers: vec![],
        body: String::new(),
        auth: String::new(),
        timeout: Duration::from_secs(10),
    }
}

#[test]
fn bare_credential_becomes_bearer() {
    assert_eq!(authorization_value("abc"), "Bearer abc");
}

#[test]
fn recognized_schemes_pass_through() {
    assert_eq!(authorization_value("Basic xyz"), "Basic xyz");
    assert_eq!(authorization_value("Bearer token"), "Bearer token");
}

#[test]
fn body_defaults_content_type_to_json() -> Result<(), String> {
    let executor = HttpExecutor::new().map_err(|err| format!("client build failed: {}", err))?;
    let mut spec = base_spec("http://localhost/items");
    spec.body = "{\"a\":1}".to_owned();

    let request = executor
        .build_request(&spec)
        .map_err(|err| format!("request build failed: {}", err))?;
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| "missing content-type".to_owned())?;
    if content_type != "application/json" {
        return Err(format!("unexpected content-type: {}", content_type));
    }
    Ok(())
}

#[test]
fn explicit_content_type_wins_over_default() -> Result<(), String> {
    let executor = HttpExecutor::new().map_err(|err| format!("client build failed: {}", err))?;
    let mut spec = base_spec("http://localhost/items");
    spec.body = "plain".to_owned();
    spec.headers = vec![("Content-Type".to_owned(), "text/plain".to_owned())];

    let request = executor
        .build_request(&spec)
        .map_err(|err| format!("request build failed: {}", err))?;
    let values: Vec<&str> = request
        .headers()
        .get_all(header::CONTENT_TYPE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    if values != vec!["text/plain"] {
        return Err(format!("unexpected content-type values: {:?}", values));
    }
    Ok(())
}

#[test]
fn bodyless_request_carries_no_content_type() -> Result<(), String> {
    let executor = HttpExecutor::new().map_err(|err| format!("client build failed: {}", err))?;
    let spec = base_spec("http://localhost/items");

    let request = executor
        .build_request(&spec)
        .map_err(|err| format!("request build failed: {}", err))?;
    if request.headers().get(header::CONTENT_TYPE).is_some() {
        return Err("expected no content-type without a body".to_owned());
    }
    Ok(())
}

#[test]
fn credential_lands_in_authorization_header() -> Result<(), String> {
    let executor = HttpExecutor::new().map_err(|err| format!("client build failed: {}", err))?;
    let mut spec = base_spec("http://localhost/items");
    spec.auth = "my-token".to_owned();

    let request = executor
        .build_request(&spec)
        .map_err(|err| format!("request build failed: {}", err))?;
    let auth = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| "missing authorization".to_owned())?;
    if auth != "Bearer my-token" {
        return Err(format!("unexpected authorization value: {}", auth));
    }
    Ok(())
}

#[test]
fn json_body_is_pretty_printed() {
    let exchange = Exchange {
        status: StatusCode::OK,
        body: b"{\"id\":1}".to_vec(),
        latency: Duration::from_millis(12),
    };
    let lines = response_lines(&exchange);
    assert!(lines.iter().any(|line| line == "Status:   200 OK"));
    assert!(lines.iter().any(|line| line == "Response (JSON):"));
    assert!(lines.iter().any(|line| line.contains("\"id\": 1")));
}

#[test]
fn non_json_body_is_rendered_raw() {
    let exchange = Exchange {
        status: StatusCode::NOT_FOUND,
        body: b"not found".to_vec(),
        latency: Duration::from_millis(3),
    };
    let lines = response_lines(&exchange);
    assert!(lines.iter().any(|line| line == "Status:   404 Not Found"));
    assert!(lines.iter().any(|line| line == "Response (raw):"));
    assert!(lines.iter().any(|line| line == "not found"));
}
