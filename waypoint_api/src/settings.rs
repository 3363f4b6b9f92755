use std::net::SocketAddr;

use anyhow::Context;
use waypoint_optimizer::solver::optimizer_params::Threads;

const ADDR_ENV_VAR: &str = "WAYPOINT_ADDR";
const THREADS_ENV_VAR: &str = "WAYPOINT_THREADS";
const CACHE_CAPACITY_ENV_VAR: &str = "WAYPOINT_CACHE_CAPACITY";
const DEBUG_ENV_VAR: &str = "WAYPOINT_DEBUG";

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Process level settings, read from the environment.
#[derive(Debug)]
pub struct Settings {
    pub addr: SocketAddr,
    pub threads: Threads,
    /// Number of results kept in memory, 0 disables the cache.
    pub cache_capacity: usize,
    pub debug: bool,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr: SocketAddr = lookup(ADDR_ENV_VAR)
            .unwrap_or_else(|| DEFAULT_ADDR.to_owned())
            .parse()
            .with_context(|| format!("{ADDR_ENV_VAR} is not a socket address"))?;

        let threads = match lookup(THREADS_ENV_VAR) {
            Some(value) => value.parse::<Threads>().map_err(anyhow::Error::msg)?,
            None => Threads::Auto,
        };

        let cache_capacity = match lookup(CACHE_CAPACITY_ENV_VAR) {
            Some(value) => value
                .parse::<usize>()
                .with_context(|| format!("{CACHE_CAPACITY_ENV_VAR} must be a number"))?,
            None => DEFAULT_CACHE_CAPACITY,
        };

        let debug = lookup(DEBUG_ENV_VAR).is_some_and(|value| value == "1" || value == "true");

        Ok(Settings {
            addr,
            threads,
            cache_capacity,
            debug,
        })
    }
}
