//! Runtime configuration from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `HOST` | `0.0.0.0` | Interface to listen on |
//! | `PORT` | `8080` | TCP port to listen on |
//!
//! Log verbosity is not part of [`Config`]: the binary reads `RUST_LOG`
//! directly through `tracing_subscriber::EnvFilter`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::Error;

const DEFAULT_PORT: u16 = 8080;

/// Server configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Listen address.
    pub addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
        }
    }
}

impl Config {
    /// Reads `HOST` and `PORT` from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), with `lookup` standing in for the
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(host) => host.parse::<IpAddr>().map_err(|e| Error::Config {
                var: "HOST",
                reason: format!("`{host}` is not an IP address: {e}"),
            })?,
            None => defaults.addr.ip(),
        };

        let port = match lookup("PORT") {
            Some(port) => port.parse::<u16>().map_err(|e| Error::Config {
                var: "PORT",
                reason: format!("`{port}` is not a port number: {e}"),
            })?,
            None => defaults.addr.port(),
        };

        Ok(Self { addr: SocketAddr::new(host, port) })
    }
}
