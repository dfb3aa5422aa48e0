use std::io::Read;

use crate::args::{HttpMethod, RequestArgs};
use crate::envfile::Env;
use crate::error::AppResult;
use crate::http::{HttpExecutor, RequestSpec, response_lines};

use super::{resolve_url, validate_json_body};

/// Sends one ad-hoc request and prints the rendered response.
///
/// # Errors
///
/// Returns an error when validation fails, the body cannot be read from
/// stdin, or the request fails at the transport level.
pub async fn run_request(method: HttpMethod, args: &RequestArgs, env: &Env) -> AppResult<()> {
    let url = resolve_url(&args.url, env)?;

    let raw_body = match args.body.clone() {
        Some(body) => body,
        None if method_accepts_body(method) => read_body_interactive()?,
        None => String::new(),
    };
    let body = env.interpolate(&raw_body);
    validate_json_body(&body)?;

    let headers = env.interpolate_headers(&args.headers);
    let auth = env.interpolate(&args.auth);

    let spec = RequestSpec {
        method,
        url,
        headers,
        body,
        auth,
        timeout: args.timeout,
    };

    let executor = HttpExecutor::new()?;
    let exchange = executor.send(&spec).await?;

    for line in response_lines(&exchange) {
        println!("{}", line);
    }
    Ok(())
}

const fn method_accepts_body(method: HttpMethod) -> bool {
    matches!(
        method,
        HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch
    )
}

fn read_body_interactive() -> AppResult<String> {
    println!("Enter JSON body (end with Ctrl+D, or Ctrl+Z on Windows):");
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer.trim().to_owned())
}
