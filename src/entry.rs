use clap::Parser;
use tracing::info;

use crate::app;
use crate::args::{Command, HttpMethod, ProbeArgs};
use crate::envfile::Env;
use crate::error::AppResult;

/// Parses the CLI, initializes logging, builds the runtime, and dispatches
/// the selected command.
///
/// # Errors
///
/// Returns an error when the runtime cannot be built or the selected
/// command fails.
pub fn run() -> AppResult<()> {
    let args = ProbeArgs::parse();

    crate::logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

async fn run_async(args: ProbeArgs) -> AppResult<()> {
    let env = Env::load(args.env_file.as_deref())?;
    if let Some(path) = args.env_file.as_deref() {
        info!("Loaded environment {} ({} variables)", path, env.len());
    }

    match &args.command {
        Command::Get(request) => app::run_request(HttpMethod::Get, request, &env).await,
        Command::Post(request) => app::run_request(HttpMethod::Post, request, &env).await,
        Command::Put(request) => app::run_request(HttpMethod::Put, request, &env).await,
        Command::Patch(request) => app::run_request(HttpMethod::Patch, request, &env).await,
        Command::Delete(request) => app::run_request(HttpMethod::Delete, request, &env).await,
        Command::Stress(stress) => app::run_stress(stress, &env).await,
        Command::Collection(collection) => {
            app::run_collection(collection, args.collections_path.as_deref(), &env).await
        }
    }
}
