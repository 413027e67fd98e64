use std::env;
use std::net::{IpAddr, SocketAddr};

use crate::error::{config_error, Error};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum StorageKind {
    Memory,
    Db { url: String, max_connections: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub storage: StorageKind,
}

impl Config {
    /// Reads the process environment, after loading a `.env` file if present.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(err) => Err(err.into()),
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<Option<String>, Error>,
    {
        let host: IpAddr = match lookup("LODGING_API_HOST")? {
            Some(host) => host
                .parse()
                .map_err(|_| config_error(format!("invalid LODGING_API_HOST: {}", host)))?,
            None => DEFAULT_HOST
                .parse()
                .map_err(|_| config_error("invalid default host".into()))?,
        };

        let port = match lookup("LODGING_API_PORT")? {
            Some(port) => port
                .parse()
                .map_err(|_| config_error(format!("invalid LODGING_API_PORT: {}", port)))?,
            None => DEFAULT_PORT,
        };

        let storage = match lookup("LODGING_STORAGE")?.as_deref() {
            None | Some("memory") => StorageKind::Memory,
            Some("db") => {
                let url = lookup("DATABASE_URL")?
                    .ok_or_else(|| config_error("DATABASE_URL is required for db storage".into()))?;

                let max_connections = match lookup("DATABASE_MAX_CONNECTIONS")? {
                    Some(max) => max.parse().map_err(|_| {
                        config_error(format!("invalid DATABASE_MAX_CONNECTIONS: {}", max))
                    })?,
                    None => DEFAULT_MAX_CONNECTIONS,
                };

                StorageKind::Db {
                    url,
                    max_connections,
                }
            }
            Some(other) => {
                return Err(config_error(format!("unknown LODGING_STORAGE: {}", other)));
            }
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
            storage,
        })
    }
}
