use std::collections::BTreeMap;
use std::time::Duration;

use crate::args::{CollectionCommand, CollectionNameArgs, CollectionSaveArgs, RequestArgs};
use crate::collection::{CollectionStore, SaveOutcome, SavedRequest};
use crate::envfile::Env;
use crate::error::AppResult;

/// Dispatches a `collection` subcommand against the configured store.
///
/// # Errors
///
/// Returns an error when the store cannot be read or written, or a named
/// request does not exist.
pub async fn run_collection(
    command: &CollectionCommand,
    override_path: Option<&str>,
    env: &Env,
) -> AppResult<()> {
    let store = CollectionStore::open(override_path)?;
    match command {
        CollectionCommand::Save(save) => save_request(&store, save),
        CollectionCommand::List => list_requests(&store),
        CollectionCommand::Run(name) => run_saved(&store, name, env).await,
        CollectionCommand::Delete(name) => delete_request(&store, name),
    }
}

fn save_request(store: &CollectionStore, args: &CollectionSaveArgs) -> AppResult<()> {
    let headers: BTreeMap<String, String> = args.headers.iter().cloned().collect();
    let request = SavedRequest {
        name: args.name.clone(),
        method: args.method,
        url: args.url.clone(),
        headers,
        body: args.body.clone(),
        auth: args.auth.clone(),
        timeout_ms: u64::try_from(args.timeout.as_millis()).unwrap_or(u64::MAX),
    };

    match store.save(request)? {
        SaveOutcome::Created => println!("Saved request '{}' to collection.", args.name),
        SaveOutcome::Updated => println!("Updated request '{}' in collection.", args.name),
    }
    Ok(())
}

fn list_requests(store: &CollectionStore) -> AppResult<()> {
    let requests = store.list()?;
    if requests.is_empty() {
        println!("No saved requests. Use 'apiprobe collection save' to add one.");
        return Ok(());
    }

    println!("{:<20}  {:<7}  {}", "NAME", "METHOD", "URL");
    for request in &requests {
        println!(
            "{:<20}  {:<7}  {}",
            request.name,
            request.method.as_str(),
            request.url
        );
    }
    Ok(())
}

async fn run_saved(store: &CollectionStore, args: &CollectionNameArgs, env: &Env) -> AppResult<()> {
    let saved = store.get(&args.name)?;
    println!(
        "Running '{}' [{} {}]",
        saved.name,
        saved.method.as_str(),
        saved.url
    );
    println!();

    let headers: Vec<(String, String)> = saved
        .headers
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let request_args = RequestArgs {
        url: saved.url,
        headers,
        body: Some(saved.body),
        auth: saved.auth,
        timeout: Duration::from_millis(saved.timeout_ms),
    };
    super::run_request(saved.method, &request_args, env).await
}

fn delete_request(store: &CollectionStore, args: &CollectionNameArgs) -> AppResult<()> {
    store.delete(&args.name)?;
    println!("Deleted request '{}' from collection.", args.name);
    Ok(())
}
