use std::{
    env, fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{errors::Error, Result};

pub const DEFAULT_TRIGGER: &str = ".";
pub const DEFAULT_ADMIN_ACCESS: u32 = 100;

/// Only these keys are taken from a `.env` file.
const ENV_PREFIX: &str = "BOLT_";
const LOG_FILTER_KEY: &str = "RUST_LOG";

/// Typed configuration for the bot process.
#[derive(Clone, Debug)]
pub struct Config {
    /// Prefix that marks a message as a command, e.g. `.` in `.ping`.
    pub trigger: String,
    /// Line-delimited gateway events; stdin when unset.
    pub events_path: Option<PathBuf>,
    /// Snowflake ids of authors granted `admin_access`.
    pub admins: Vec<String>,
    pub admin_access: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trigger: DEFAULT_TRIGGER.to_string(),
            events_path: None,
            admins: Vec::new(),
            admin_access: DEFAULT_ADMIN_ACCESS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let from_file = load_dotenv_if_present(Path::new(".env"));
        if !from_file.is_empty() {
            debug!(keys = ?from_file, ".env applied");
        }

        let cfg = Self::from_env()?;
        debug!(
            trigger = %cfg.trigger,
            admins = cfg.admins.len(),
            admin_access = cfg.admin_access,
            events = ?cfg.events_path,
            "config loaded"
        );
        Ok(cfg)
    }

    /// Read the process environment only (no `.env`).
    pub fn from_env() -> Result<Self> {
        let trigger = env_str("BOLT_TRIGGER").unwrap_or_else(|| DEFAULT_TRIGGER.to_string());
        if trigger.trim().is_empty() {
            return Err(Error::Config(
                "BOLT_TRIGGER must not be empty".to_string(),
            ));
        }

        let events_path = env_str("BOLT_EVENTS")
            .and_then(non_empty)
            .map(PathBuf::from);
        let admins = parse_csv(env_str("BOLT_ADMINS"));

        let admin_access = match env_str("BOLT_ADMIN_ACCESS") {
            None => DEFAULT_ADMIN_ACCESS,
            Some(v) => v.trim().parse::<u32>().map_err(|e| {
                Error::Config(format!("BOLT_ADMIN_ACCESS must be a number: {e}"))
            })?,
        };

        Ok(Self {
            trigger,
            events_path,
            admins,
            admin_access,
        })
    }

    /// Access level of a message author; 0 for everyone but admins.
    pub fn access_for(&self, author_id: Option<&str>) -> u32 {
        match author_id {
            Some(id) if self.admins.iter().any(|a| a == id) => self.admin_access,
            _ => 0,
        }
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Export `BOLT_*` and `RUST_LOG` entries of a `.env` file that the process
/// environment does not already set. Returns the keys that were applied.
fn load_dotenv_if_present(path: &Path) -> Vec<String> {
    let Ok(contents) = fs::read_to_string(path) else {
        return Vec::new();
    };

    let mut applied = Vec::new();
    for (key, val) in contents.lines().filter_map(dotenv_entry) {
        if !(key.starts_with(ENV_PREFIX) || key == LOG_FILTER_KEY) {
            continue;
        }
        if env::var_os(key).is_some() {
            continue;
        }
        env::set_var(key, val);
        applied.push(key.to_string());
    }
    applied
}

/// `KEY=value`, with optional `export ` and one layer of matching quotes.
fn dotenv_entry(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, val) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let val = val.trim();
    let unquoted = ['"', '\'']
        .into_iter()
        .find_map(|q| val.strip_prefix(q)?.strip_suffix(q));
    Some((key, unquoted.unwrap_or(val)))
}

fn parse_csv(v: Option<String>) -> Vec<String> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
