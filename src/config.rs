//! Invocation configuration: where the store lives, which login client to run,
//! and the per-user defaults for `add`.
//!
//! Precedence for the store directory:
//!   --config-dir  >  SUPERSHELL_CONFIG_DIR  >  <user config dir>/supershell

use std::path::PathBuf;

use crate::store::StoreError;

pub const APP_DIR: &str = "supershell";
pub const CONFIG_DIR_ENV: &str = "SUPERSHELL_CONFIG_DIR";
pub const SSH_PROGRAM_ENV: &str = "SUPERSHELL_SSH";
pub const DEFAULT_SSH_PROGRAM: &str = "ssh";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `connections.json`
    pub store_dir: PathBuf,
    /// Login client looked up on PATH
    pub ssh_program: String,
}

impl Config {
    /// Resolve from the CLI override and the process environment.
    pub fn resolve(config_dir: Option<PathBuf>) -> Result<Self, StoreError> {
        let env_dir = non_empty_env(CONFIG_DIR_ENV).map(PathBuf::from);
        let ssh_program = non_empty_env(SSH_PROGRAM_ENV);
        Self::from_parts(config_dir.or(env_dir), ssh_program, dirs::config_dir())
    }

    fn from_parts(
        explicit_dir: Option<PathBuf>,
        ssh_program: Option<String>,
        user_config_dir: Option<PathBuf>,
    ) -> Result<Self, StoreError> {
        let store_dir = match explicit_dir {
            Some(dir) => dir,
            None => user_config_dir.ok_or(StoreError::NoConfigDir)?.join(APP_DIR),
        };
        Ok(Self {
            store_dir,
            ssh_program: ssh_program.unwrap_or_else(|| DEFAULT_SSH_PROGRAM.to_string()),
        })
    }
}

/// Login name used when `add` gets no `--user`.
pub fn default_user() -> String {
    non_empty_env("USER").unwrap_or_else(whoami::username)
}

/// `$HOME/.ssh/id_rsa`, or empty when there is no home directory.
pub fn default_key_path() -> String {
    dirs::home_dir()
        .map(|home| home.join(".ssh").join("id_rsa").to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}
