use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod output;
mod commands {
    pub mod list;
    pub mod send;
    pub mod serve;
}

use cli::{Cli, Commands};
use output::OutputFormat;
use postbox::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("postbox=info".parse()?))
        .init();

    let config = Config::from(&cli.config);

    match cli.command {
        None | Some(Commands::Serve) => commands::serve::run(&config).await,
        Some(Commands::Send(args)) => commands::send::run(&config, &args).await,
        Some(Commands::List(args)) => {
            commands::list::run(&config, OutputFormat::from_json_flag(args.json)).await
        }
    }
}
