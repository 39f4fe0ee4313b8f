/*!
`update.rs`

Implements the `update` subcommand: selective overwrite of an existing record.

Only flags given with a non-empty value (non-zero for --port) change the
record; there are no defaults here, and a field cannot be cleared.
*/

use anyhow::{Context, Result};
use clap::Args;

use crate::cmd::format::{Role, summary_line};
use crate::cmd::shared::{ProfileFlags, UsageError, confirm, require_name};
use crate::log_debug;
use crate::store::Store;

/// CLI arguments for `supershell update`
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Nickname of the connection to modify
    #[arg(short = 'n', long = "name", value_name = "NICKNAME")]
    pub name: String,

    #[command(flatten)]
    pub profile: ProfileFlags,
}

impl UpdateArgs {
    pub fn validate(&self) -> Result<(), UsageError> {
        require_name("update", &self.name).map(|_| ())
    }
}

/// Entry point for the update subcommand.
pub fn execute_update(store: &Store, args: UpdateArgs) -> Result<()> {
    let name = require_name("update", &args.name)?.to_string();
    let patch = args.profile.into_patch();
    if patch.is_noop() {
        confirm(
            "warn",
            Role::Warning,
            format!("no fields given for '{name}'; record left as is"),
        );
    }
    log_debug!("updating {name} in {}", store.path().display());

    let updated = store
        .update(&name, &patch)
        .with_context(|| format!("Failed to update '{name}'"))?;
    confirm(
        "success",
        Role::Success,
        format!("updated {}", summary_line(&updated)),
    );
    Ok(())
}
