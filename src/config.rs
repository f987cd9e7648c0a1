//! Process configuration.
//!
//! Every option can come from a command-line flag or the environment variable
//! named next to it. `DATABASE_URL` and `PORT` have no default; startup fails
//! with a usage error when either is missing.

use crate::error::ErrorStatus;
use clap::Parser;
use document_store::{Backing, DEFAULT_CAPACITY};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "fruits", version, about = "Server-rendered CRUD app for fruit records")]
pub struct Config {
    /// Record store: `memory://` or `file://<path-to-json>`.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Backing,

    #[arg(long, env = "PORT")]
    pub port: u16,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Directory served for paths no route matches.
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// `legacy` answers data-access failures with 200, `strict` with 4xx/5xx.
    #[arg(long, env = "ERROR_STATUS", value_enum, default_value = "legacy")]
    pub error_status: ErrorStatus,

    /// Requests that may queue for the record store before senders wait.
    #[arg(long, env = "STORE_CHANNEL_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub channel_capacity: usize,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
