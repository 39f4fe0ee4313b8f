/*!
`add.rs`

Implements the `add` subcommand: validate flags, fill per-user defaults, and
insert a new connection record.

Defaults (only for `add`):
  --port  22
  --user  current OS user ($USER, else the account name)
  --auth  key
  --key   $HOME/.ssh/id_rsa

Only the credential selected by `--auth` is stored.
*/

use anyhow::{Context, Result};
use clap::Args;

use crate::cmd::format::Role;
use crate::cmd::shared::{ProfileFlags, UsageError, confirm};
use crate::config;
use crate::log_debug;
use crate::store::{AuthMethod, DEFAULT_PORT, Record, Store};

/// CLI arguments for `supershell add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Nickname for the connection (unique)
    #[arg(short = 'n', long = "name", value_name = "NICKNAME")]
    pub name: String,

    #[command(flatten)]
    pub profile: ProfileFlags,
}

/// Values `add` falls back to when a flag is omitted.
#[derive(Debug, Clone)]
pub struct AddDefaults {
    pub user: String,
    pub key_path: String,
}

impl AddDefaults {
    pub fn from_env() -> Self {
        Self {
            user: config::default_user(),
            key_path: config::default_key_path(),
        }
    }
}

impl AddArgs {
    pub fn validate(&self) -> Result<(), UsageError> {
        build_record(self, &AddDefaults::from_env()).map(|_| ())
    }
}

/// Entry point for the add subcommand.
pub fn execute_add(store: &Store, args: AddArgs) -> Result<()> {
    let record = build_record(&args, &AddDefaults::from_env())?;
    let nickname = record.nickname.clone();
    log_debug!("adding {} ({})", nickname, record.address());
    store
        .add(record)
        .with_context(|| format!("Failed to add '{nickname}'"))?;
    confirm("success", Role::Success, format!("added '{nickname}'"));
    Ok(())
}

/// Turn flags into a record, applying defaults and the auth rules.
pub fn build_record(args: &AddArgs, defaults: &AddDefaults) -> Result<Record, UsageError> {
    let flags = &args.profile;
    let nickname = args.name.trim();
    let host = flags.host.as_deref().map(str::trim).unwrap_or_default();
    if nickname.is_empty() || host.is_empty() {
        return Err(UsageError::new("add requires --name and --host"));
    }

    let port = flags.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(UsageError::new("--port must be between 1 and 65535"));
    }

    let user = flags
        .user
        .clone()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| defaults.user.clone());

    let auth_method = flags.auth.unwrap_or_default();
    let (key_path, password) = match auth_method {
        AuthMethod::Key => {
            let key = flags
                .key
                .clone()
                .unwrap_or_else(|| defaults.key_path.clone());
            if key.is_empty() {
                return Err(UsageError::new("--key required when --auth=key"));
            }
            (key, String::new())
        }
        AuthMethod::Password => {
            let password = flags.password.clone().unwrap_or_default();
            if password.is_empty() {
                return Err(UsageError::new("--password required when --auth=password"));
            }
            (String::new(), password)
        }
    };

    Ok(Record {
        nickname: nickname.to_string(),
        host: host.to_string(),
        port,
        user,
        auth_method,
        key_path,
        password,
    })
}
