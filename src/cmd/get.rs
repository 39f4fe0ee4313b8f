/*!
`get.rs`

Implements the `get` subcommand: show one connection.

Human output:
  web1	alice@10.0.0.5:22	key
  key:	/tmp/id

or, for password auth, `password:\t********` (one `*` per byte).
The plaintext password is never printed.

JSON Output Shape:
{ "status": "ok", "connection": { ...masked record... } }
*/

use anyhow::{Context, Result};
use clap::Args;

use crate::cmd::format::detail_lines;
use crate::cmd::shared::{UsageError, record_json, require_name};
use crate::store::Store;

/// CLI arguments for `supershell get`
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Nickname of the connection to show
    #[arg(short = 'n', long = "name", value_name = "NICKNAME")]
    pub name: String,

    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

impl GetArgs {
    pub fn validate(&self) -> Result<(), UsageError> {
        require_name("get", &self.name).map(|_| ())
    }
}

/// Entry point for the get subcommand.
pub fn execute_get(store: &Store, args: GetArgs) -> Result<()> {
    let name = require_name("get", &args.name)?;
    let record = store
        .get(name)
        .with_context(|| format!("Failed to get '{name}'"))?;

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "connection": record_json(&record),
            })
        );
        return Ok(());
    }

    for line in detail_lines(&record) {
        println!("{line}");
    }
    Ok(())
}
