/*!
shared.rs - shared pieces for subcommands.

Focus:
  - ProfileFlags: the connection fields accepted by `add` and `update`
  - UsageError + require_name: validation failures (exit code 2)
  - record_json: masked JSON view of a record for --json output
  - confirm: stdout confirmation line, silenced by --quiet
*/

use clap::Args;
use thiserror::Error;

use crate::cmd::format::{Role, StyleOptions, mask, status_line};
use crate::store::{AuthMethod, Record, RecordPatch};
use crate::utils::logging;

/* ---- Errors ---- */

/// Invalid or missing flags, detected before the store is touched.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UsageError(pub String);

impl UsageError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Reject empty / whitespace-only nicknames.
pub fn require_name<'a>(verb: &str, name: &'a str) -> Result<&'a str, UsageError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(UsageError::new(format!("{verb} requires --name")));
    }
    Ok(name)
}

/* ---- Flags ---- */

/// Connection fields shared by `add` (defaults filled in) and `update`
/// (applied as a selective patch, no defaults).
#[derive(Args, Debug, Default, Clone)]
pub struct ProfileFlags {
    /// Host name or IP address
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// SSH port (add default: 22)
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Login user (add default: current OS user)
    #[arg(short = 'u', long, value_name = "USER")]
    pub user: Option<String>,

    /// Authentication method (add default: key)
    #[arg(long = "auth", value_enum, value_name = "METHOD")]
    pub auth: Option<AuthMethod>,

    /// Private key path (add default: $HOME/.ssh/id_rsa)
    #[arg(short = 'k', long = "key", value_name = "PATH")]
    pub key: Option<String>,

    /// Password, stored in plaintext in the connection file
    #[arg(long, value_name = "PASSWORD")]
    pub password: Option<String>,
}

impl ProfileFlags {
    pub fn into_patch(self) -> RecordPatch {
        RecordPatch {
            host: self.host,
            port: self.port,
            user: self.user,
            auth_method: self.auth,
            key_path: self.key,
            password: self.password,
        }
    }
}

/* ---- Output ---- */

/// JSON view of a record; the password is masked.
pub fn record_json(record: &Record) -> serde_json::Value {
    serde_json::json!({
        "nickname": record.nickname,
        "host": record.host,
        "port": record.port,
        "user": record.user,
        "auth_method": record.auth_method.as_str(),
        "key_path": record.active_key_path(),
        "password": record.active_password().map(mask),
    })
}

/// Print a confirmation on stdout unless running with --quiet.
pub fn confirm(tag: &str, role: Role, msg: impl AsRef<str>) {
    if logging::is_quiet() {
        return;
    }
    println!("{}", status_line(tag, role, msg, &StyleOptions::stdout()));
}
