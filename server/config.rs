use std::net::IpAddr;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST_DIR: &str = "./dist";

/// Where the built map client lives and where it is served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub dist_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
        }
    }
}

impl ServerConfig {
    /// Read `BIND_ADDR`, `PORT` and `DIST_DIR` from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any variable source
    ///
    /// Unset or unparsable values fall back to their defaults with a warning.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = parse_or(lookup("PORT"), "PORT", defaults.port);
        let bind_addr = parse_or(lookup("BIND_ADDR"), "BIND_ADDR", defaults.bind_addr);
        let dist_dir = lookup("DIST_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or(defaults.dist_dir, PathBuf::from);

        Self { bind_addr, port, dist_dir }
    }

    /// The client entry point; without it every route would 404
    #[must_use]
    pub fn index_file(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, key: &str, default: T) -> T {
    let Some(value) = value else { return default };
    value.trim().parse().unwrap_or_else(|_| {
        log::warn!("Ignoring {key}={value:?}, not a valid value");
        default
    })
}
