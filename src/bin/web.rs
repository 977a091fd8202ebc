use clap::Parser;
use datagrid::app::{self, ServerArgs};

/// Main entry point for the web application
///
/// Reads the server configuration from the command line (with environment
/// fallbacks), installs the logger and serves the grid API until the process
/// is stopped. Set `RUST_LOG=debug` to see bounds misses and view recomputes.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = ServerArgs::parse();
    app::run(args).await
}
