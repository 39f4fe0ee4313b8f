/*!
`list.rs`

Implements the `list` subcommand for the `supershell` CLI.

Human output: one tab-separated line per connection, ascending by nickname:
  web1	alice@10.0.0.5:22	key

or `No connections saved.` when the store is empty.

JSON Output Shape:
{
  "status": "ok",
  "count": 1,
  "connections": [
    { "nickname": "web1", "host": "10.0.0.5", "port": 22, "user": "alice",
      "auth_method": "key", "key_path": "/tmp/id", "password": null }
  ]
}
Passwords are masked in JSON as well.
*/

use anyhow::{Context, Result};
use clap::Args;

use crate::cmd::format::summary_line;
use crate::cmd::shared::record_json;
use crate::store::{Record, Store};

pub const EMPTY_MESSAGE: &str = "No connections saved.";

/// CLI arguments for `supershell list`
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

/// Entry point for the list subcommand.
pub fn execute_list(store: &Store, args: ListArgs) -> Result<()> {
    let records = store.list().context("Failed to list connections")?;
    if args.json {
        println!("{}", list_json(&records));
    } else {
        for line in render_list(&records) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn render_list(records: &[Record]) -> Vec<String> {
    if records.is_empty() {
        return vec![EMPTY_MESSAGE.to_string()];
    }
    records.iter().map(summary_line).collect()
}

pub fn list_json(records: &[Record]) -> serde_json::Value {
    let items: Vec<_> = records.iter().map(record_json).collect();
    serde_json::json!({
        "status": "ok",
        "count": records.len(),
        "connections": items,
    })
}
