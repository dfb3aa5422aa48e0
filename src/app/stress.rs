use std::sync::Arc;
use std::time::Duration;

use crate::args::StressArgs;
use crate::envfile::Env;
use crate::error::AppResult;
use crate::http::HttpExecutor;
use crate::stress;
use crate::stress::StressSpec;

/// Safety-net duration when a request cap is the binding stop condition;
/// workers stop via the shared budget well before this elapses.
const SAFETY_NET_DURATION: Duration = Duration::from_secs(86_400);

/// Builds the stress spec from CLI input, runs the load generator, and
/// prints the report.
///
/// # Errors
///
/// Returns an error when validation fails or the run cannot be completed.
pub async fn run_stress(args: &StressArgs, env: &Env) -> AppResult<()> {
    let url = super::resolve_url(&args.url, env)?;
    let body = env.interpolate(&args.body);
    super::validate_json_body(&body)?;
    let headers = env.interpolate_headers(&args.headers);
    let auth = env.interpolate(&args.auth);

    let max_requests = (args.requests > 0).then_some(args.requests);
    let duration = if max_requests.is_some() {
        SAFETY_NET_DURATION
    } else {
        args.duration
    };

    let spec = StressSpec {
        method: args.method,
        url,
        headers,
        body,
        auth,
        concurrency: args.concurrency,
        duration,
        max_requests,
        timeout: args.timeout,
    };

    println!(
        "Starting stress test: {} {}",
        spec.method.as_str(),
        spec.url
    );

    let executor = Arc::new(HttpExecutor::new()?);
    let run = stress::run_stress(&spec, executor).await?;

    println!();
    for line in stress::report_lines(&spec, &run.result, run.elapsed) {
        println!("{}", line);
    }
    Ok(())
}
