use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod cmd;
mod config;
mod ssh;
mod store;
mod utils;

use cmd::format::{Role, StyleOptions, status_line};
use cmd::{AddArgs, ConnectArgs, DeleteArgs, GetArgs, ListArgs, UpdateArgs, UsageError};
use config::Config;
use store::Store;

/// supershell - named SSH connection profiles
///
/// Command layout:
///   supershell add     --name <NICK> --host <HOST> [--port 22] [--user U] [--auth key|password] [--key PATH] [--password PW]
///   supershell update  --name <NICK> [same flags, only given ones change]
///   supershell delete  --name <NICK>
///   supershell list    [--json]
///   supershell get     --name <NICK> [--json]
///   supershell connect --name <NICK> [--dry-run]
///
/// Global flags / env:
///   -v / -vv                Increase verbosity (logs go to stderr)
///   -q / --quiet            Errors only
///   --config-dir DIR        Store directory (or SUPERSHELL_CONFIG_DIR)
///   SUPERSHELL_SSH          Login client to run (default: ssh)
///
/// Exit codes:
///   0 success, 1 store / IO failure, 2 usage error,
///   connect: the login client's own exit code
#[derive(Parser, Debug)]
#[command(
    name = "supershell",
    version,
    about = "Store named SSH connection profiles and connect with one command",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Directory holding connections.json (falls back to SUPERSHELL_CONFIG_DIR)
    #[arg(long = "config-dir", global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a new connection
    Add(AddArgs),

    /// Change fields of a saved connection
    Update(UpdateArgs),

    /// Remove a saved connection
    Delete(DeleteArgs),

    /// List saved connections
    List(ListArgs),

    /// Show one saved connection (password masked)
    Get(GetArgs),

    /// Open an SSH session using a saved connection
    Connect(ConnectArgs),
}

impl Commands {
    fn validate(&self) -> Result<(), UsageError> {
        match self {
            Commands::Add(args) => args.validate(),
            Commands::Update(args) => args.validate(),
            Commands::Delete(args) => args.validate(),
            Commands::List(_) => Ok(()),
            Commands::Get(args) => args.validate(),
            Commands::Connect(args) => args.validate(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            let style = StyleOptions::stderr();
            eprintln!(
                "{}",
                status_line("error", Role::Error, format!("error: {err:#}"), &style)
            );
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    cli.command.validate()?;

    let config = Config::resolve(cli.config_dir)?;
    crate::log_debug!("store directory: {}", config.store_dir.display());
    let store = Store::open(&config.store_dir).context("Failed to open connection store")?;

    match cli.command {
        Commands::Add(args) => cmd::execute_add(&store, args)?,
        Commands::Update(args) => cmd::execute_update(&store, args)?,
        Commands::Delete(args) => cmd::execute_delete(&store, args)?,
        Commands::List(args) => cmd::execute_list(&store, args)?,
        Commands::Get(args) => cmd::execute_get(&store, args)?,
        Commands::Connect(args) => return cmd::execute_connect(&store, &config, args),
    }
    Ok(0)
}

/// 2 for usage errors, 1 for everything else.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<UsageError>().is_some() {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_verb() {
        let cli =
            Cli::try_parse_from(["supershell", "list", "-vv", "--config-dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn unknown_verb_rejected() {
        assert!(Cli::try_parse_from(["supershell", "rename", "--name", "a"]).is_err());
    }

    #[test]
    fn missing_name_rejected_by_parser() {
        for verb in ["delete", "get", "connect", "update"] {
            assert!(
                Cli::try_parse_from(["supershell", verb]).is_err(),
                "{verb} should require --name"
            );
        }
    }

    #[test]
    fn add_without_host_fails_before_store() {
        let dir = tempfile::tempdir().unwrap();
        let store_dir = dir.path().join("never-created");
        let cli = Cli::try_parse_from([
            "supershell",
            "add",
            "--name",
            "web1",
            "--config-dir",
            store_dir.to_str().unwrap(),
        ])
        .unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(exit_code_for(&err), 2);
        assert!(!store_dir.exists());
    }

    #[test]
    fn not_found_maps_to_exit_1() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "supershell",
            "get",
            "--name",
            "ghost",
            "--config-dir",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(exit_code_for(&err), 1);
        assert!(format!("{err:#}").contains("not found: ghost"));
    }

    #[test]
    fn add_then_list_through_dispatcher() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        for name in ["web2", "web1"] {
            let cli = Cli::try_parse_from([
                "supershell",
                "-q",
                "add",
                "--name",
                name,
                "--host",
                "10.0.0.5",
                "--key",
                "/tmp/id",
                "--config-dir",
                root,
            ])
            .unwrap();
            assert_eq!(run(cli).unwrap(), 0);
        }
        let store = Store::open(dir.path()).unwrap();
        let names: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|r| r.nickname)
            .collect();
        assert_eq!(names, vec!["web1", "web2"]);
    }
}
