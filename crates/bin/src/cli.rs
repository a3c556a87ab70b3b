//! CLI argument definitions for the Postbox binary.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use postbox::{Config, config};

/// Postbox: static pages and a message form, relayed over UDP into a JSON file
#[derive(Parser, Debug)]
#[command(name = "postbox")]
#[command(about = "Postbox: static pages and a message form relayed into a JSON file")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP front-end and the UDP relay (default)
    Serve,
    /// Send one message to a running relay
    Send(SendArgs),
    /// Print the messages in the store
    List(ListArgs),
}

/// Settings shared by every command
#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// Host for both the HTTP server and the relay
    #[arg(long, global = true, default_value_t = config::DEFAULT_HOST, env = "POSTBOX_HOST")]
    pub host: IpAddr,

    /// HTTP port
    #[arg(short, long, global = true, default_value_t = config::DEFAULT_HTTP_PORT, env = "POSTBOX_HTTP_PORT")]
    pub port: u16,

    /// UDP port of the relay
    #[arg(long, global = true, default_value_t = config::DEFAULT_RELAY_PORT, env = "POSTBOX_RELAY_PORT")]
    pub relay_port: u16,

    /// Directory holding index.html, message.html and error.html
    #[arg(long, global = true, default_value = "templates", env = "POSTBOX_TEMPLATES_DIR")]
    pub templates_dir: PathBuf,

    /// Directory served under /static/
    #[arg(long, global = true, default_value = "static", env = "POSTBOX_STATIC_DIR")]
    pub static_dir: PathBuf,

    /// Directory holding the message store
    #[arg(short = 'D', long, global = true, default_value = "storage", env = "POSTBOX_STORAGE_DIR")]
    pub storage_dir: PathBuf,

    /// File name of the message store inside the storage directory
    #[arg(long, global = true, default_value = "data.json", env = "POSTBOX_DATA_FILE")]
    pub data_file: String,

    /// Maximum number of HTTP requests handled at once
    #[arg(long, global = true, default_value_t = config::DEFAULT_MAX_CONCURRENT_REQUESTS, env = "POSTBOX_MAX_CONCURRENT_REQUESTS")]
    pub max_concurrent_requests: usize,
}

impl From<&ConfigArgs> for Config {
    fn from(args: &ConfigArgs) -> Self {
        Config {
            host: args.host,
            http_port: args.port,
            relay_port: args.relay_port,
            templates_dir: args.templates_dir.clone(),
            static_dir: args.static_dir.clone(),
            storage_dir: args.storage_dir.clone(),
            data_file: args.data_file.clone(),
            max_concurrent_requests: args.max_concurrent_requests,
        }
    }
}

/// Arguments for the send command
#[derive(clap::Args, Debug)]
pub struct SendArgs {
    /// Name to send the message as
    #[arg(short, long, default_value = "")]
    pub username: String,

    /// Message text
    pub message: String,
}

/// Arguments for the list command
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Print the raw JSON object instead of a table
    #[arg(long)]
    pub json: bool,
}
