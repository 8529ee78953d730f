//! Console Settings
//!
//! Process-level settings for the console binary. Guard settings live in
//! `guard::GuardConfig`.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct ConsoleSettings {
    /// Listen address
    pub addr: SocketAddr,
    /// Directory holding `static/`, public files and `favicon.ico`
    pub assets_dir: PathBuf,
    /// Base URL of the hospital REST API the pages talk to
    pub api_base: String,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 31114)),
            assets_dir: PathBuf::from("public"),
            api_base: "http://localhost:8000/api".to_string(),
        }
    }
}

impl ConsoleSettings {
    /// `CONSOLE_ADDR`, `CONSOLE_ASSETS`, `CONSOLE_API_BASE`
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let addr = match env::var("CONSOLE_ADDR") {
            Ok(addr) => addr
                .parse()
                .with_context(|| format!("CONSOLE_ADDR is not a socket address: {addr}"))?,
            Err(_) => defaults.addr,
        };

        Ok(Self {
            addr,
            assets_dir: env::var("CONSOLE_ASSETS")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
            api_base: env::var("CONSOLE_API_BASE").unwrap_or(defaults.api_base),
        })
    }
}
