use super::{normalize_url, resolve_url, validate_json_body};
use crate::envfile::Env;

#[test]
fn scheme_is_defaulted_to_https() {
    assert_eq!(
        normalize_url("api.example.com/users"),
        "https://api.example.com/users"
    );
    assert_eq!(normalize_url("http://localhost:8080"), "http://localhost:8080");
    assert_eq!(
        normalize_url("https://api.example.com"),
        "https://api.example.com"
    );
}

#[test]
fn unparseable_url_is_rejected_before_any_request() -> Result<(), String> {
    let env = Env::default();
    if resolve_url("https://", &env).is_ok() {
        return Err("expected an invalid URL to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn json_body_validation() -> Result<(), String> {
    validate_json_body("").map_err(|err| format!("empty body rejected: {}", err))?;
    validate_json_body("{\"a\": [1, 2]}").map_err(|err| format!("valid body rejected: {}", err))?;
    if validate_json_body("{not json").is_ok() {
        return Err("expected malformed JSON to be rejected".to_owned());
    }
    Ok(())
}
