/*!
`connect.rs`

Implements the `connect` subcommand: look up a connection and hand the
terminal to the login client.

  ssh -p <port> [-i <key>] <user>@<host>

The client inherits stdin/stdout/stderr and runs until the session ends; its
exit status becomes our exit code. `--dry-run` prints the command line instead.
Password-auth records never put the password on the command line; the client
prompts for it.
*/

use anyhow::{Context, Result};
use clap::Args;

use crate::cmd::format::{Role, StyleOptions, color, emoji};
use crate::cmd::shared::{UsageError, require_name};
use crate::config::Config;
use crate::ssh::{self, SshCommand};
use crate::store::Store;
use crate::utils::logging;
use crate::{log_debug, log_info};

/// CLI arguments for `supershell connect`
#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Nickname of the connection to open
    #[arg(short = 'n', long = "name", value_name = "NICKNAME")]
    pub name: String,

    /// Print the client command line instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

impl ConnectArgs {
    pub fn validate(&self) -> Result<(), UsageError> {
        require_name("connect", &self.name).map(|_| ())
    }
}

/// Entry point for the connect subcommand.
pub fn execute_connect(store: &Store, config: &Config, args: ConnectArgs) -> Result<u8> {
    let name = require_name("connect", &args.name)?;
    let record = store
        .get(name)
        .with_context(|| format!("Failed to connect to '{name}'"))?;
    let command = SshCommand::for_record(config.ssh_program.as_str(), &record);
    log_debug!("login command: {command}");

    if args.dry_run {
        println!("{command}");
        return Ok(0);
    }

    if !logging::is_quiet() {
        let style = StyleOptions::stderr();
        eprintln!(
            "{}{}",
            emoji("rocket", &style),
            color(
                Role::Primary,
                format!("connecting to {} ({})", record.nickname, record.address()),
                &style
            )
        );
    }

    let status = command.run()?;
    if !status.success() {
        log_info!("{} exited with {status}", command.program);
    }
    Ok(ssh::exit_code(status))
}
