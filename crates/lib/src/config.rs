//! Runtime configuration for the front-end and relay.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Default bind host for both the HTTP and UDP sides.
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
/// Default HTTP port.
pub const DEFAULT_HTTP_PORT: u16 = 3000;
/// Default relay UDP port.
pub const DEFAULT_RELAY_PORT: u16 = 5000;
/// Default cap on HTTP requests handled at once.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 256;

/// Where things live and what they listen on.
///
/// `Config::default()` is the stock local demo: HTTP on 127.0.0.1:3000,
/// the relay on 127.0.0.1:5000, and `storage/data.json` as the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub http_port: u16,
    pub relay_port: u16,
    /// Holds `index.html`, `message.html` and `error.html`.
    pub templates_dir: PathBuf,
    /// Root served under `/static/`.
    pub static_dir: PathBuf,
    pub storage_dir: PathBuf,
    pub data_file: String,
    pub max_concurrent_requests: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            http_port: DEFAULT_HTTP_PORT,
            relay_port: DEFAULT_RELAY_PORT,
            templates_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
            storage_dir: PathBuf::from("storage"),
            data_file: "data.json".to_string(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl Config {
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.http_port)
    }

    pub fn relay_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.relay_port)
    }

    pub fn data_file_path(&self) -> PathBuf {
        self.storage_dir.join(&self.data_file)
    }
}
