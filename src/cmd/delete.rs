/*!
`delete.rs`

Implements the `delete` subcommand: remove one connection by nickname.
*/

use anyhow::{Context, Result};
use clap::Args;

use crate::cmd::format::Role;
use crate::cmd::shared::{UsageError, confirm, require_name};
use crate::store::Store;

/// CLI arguments for `supershell delete`
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Nickname of the connection to remove
    #[arg(short = 'n', long = "name", value_name = "NICKNAME")]
    pub name: String,
}

impl DeleteArgs {
    pub fn validate(&self) -> Result<(), UsageError> {
        require_name("delete", &self.name).map(|_| ())
    }
}

/// Entry point for the delete subcommand.
pub fn execute_delete(store: &Store, args: DeleteArgs) -> Result<()> {
    let name = require_name("delete", &args.name)?;
    let removed = store
        .delete(name)
        .with_context(|| format!("Failed to delete '{name}'"))?;
    confirm(
        "success",
        Role::Success,
        format!("deleted '{}' ({})", removed.nickname, removed.address()),
    );
    Ok(())
}
