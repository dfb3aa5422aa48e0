use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_header, parse_positive_usize};
use super::types::{HttpMethod, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Terminal API tester - ad-hoc REST requests, saved collections, environment variables, and a concurrent stress engine."
)]
pub struct ProbeArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Path to an environment JSON file with {{variable}} values
    #[arg(long = "env", global = true, value_name = "FILE")]
    pub env_file: Option<String>,

    /// Override the collections file location
    #[arg(
        long = "collections-path",
        env = "APIPROBE_COLLECTIONS",
        global = true,
        value_name = "FILE"
    )]
    pub collections_path: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Send a GET request
    Get(RequestArgs),
    /// Send a POST request
    Post(RequestArgs),
    /// Send a PUT request
    Put(RequestArgs),
    /// Send a PATCH request
    Patch(RequestArgs),
    /// Send a DELETE request
    Delete(RequestArgs),
    /// Run a stress test against a URL
    Stress(StressArgs),
    /// Manage saved request collections
    #[command(subcommand)]
    Collection(CollectionCommand),
}

#[derive(Debug, Args, Clone)]
pub struct RequestArgs {
    /// Target URL (https:// is assumed when no scheme is given)
    pub url: String,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body (POST/PUT/PATCH read it from stdin when omitted)
    #[arg(long, short = 'd')]
    pub body: Option<String>,

    /// Authorization value ('Bearer ...', 'Basic ...', or a bare token)
    #[arg(long, default_value = "")]
    pub auth: String,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long, value_parser = parse_duration_arg, default_value = "15s")]
    pub timeout: Duration,
}

#[derive(Debug, Args, Clone)]
pub struct StressArgs {
    /// Target URL (https:// is assumed when no scheme is given)
    pub url: String,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// Number of concurrent workers
    #[arg(long, short = 'c', default_value = "10", value_parser = parse_positive_usize)]
    pub concurrency: PositiveUsize,

    /// Duration of the test (supports ms/s/m/h)
    #[arg(long, short = 't', value_parser = parse_duration_arg, default_value = "10s")]
    pub duration: Duration,

    /// Total number of requests to send (a positive value overrides --duration)
    #[arg(long, short = 'n', default_value_t = 0)]
    pub requests: u64,

    /// JSON body for each request
    #[arg(long, short = 'd', default_value = "")]
    pub body: String,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Authorization value ('Bearer ...', 'Basic ...', or a bare token)
    #[arg(long, default_value = "")]
    pub auth: String,

    /// Per-attempt timeout (supports ms/s/m/h)
    #[arg(long, value_parser = parse_duration_arg, default_value = "10s")]
    pub timeout: Duration,
}

#[derive(Debug, Subcommand, Clone)]
pub enum CollectionCommand {
    /// Save a request to the collection
    Save(CollectionSaveArgs),
    /// List all saved requests
    List,
    /// Run a saved request by name
    Run(CollectionNameArgs),
    /// Delete a saved request by name
    Delete(CollectionNameArgs),
}

#[derive(Debug, Args, Clone)]
pub struct CollectionSaveArgs {
    /// Unique name for the request
    #[arg(long)]
    pub name: String,

    /// HTTP method to use
    #[arg(long, short = 'X', ignore_case = true)]
    pub method: HttpMethod,

    /// Request URL, supports {{variable}} syntax
    #[arg(long)]
    pub url: String,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// JSON body for the request
    #[arg(long, short = 'd', default_value = "")]
    pub body: String,

    /// Authorization value stored with the request
    #[arg(long, default_value = "")]
    pub auth: String,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long, value_parser = parse_duration_arg, default_value = "15s")]
    pub timeout: Duration,
}

#[derive(Debug, Args, Clone)]
pub struct CollectionNameArgs {
    /// Name of the saved request
    pub name: String,
}
