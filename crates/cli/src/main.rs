use std::env;
use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use log::debug;

use command_runner_core::accessor::{scopes, Accessor};
use command_runner_core::config::{self, Settings, DEFAULT_SHELL};
use command_runner_core::error::Result;
use command_runner_core::executor::Executor;
use command_runner_core::select;
use command_runner_core::session::ShellSessionProvider;
use command_runner_core::state::FileStateStore;

use crate::cli_args::Args;
use crate::host::HostAccessor;
use crate::picker::QuickPick;

mod cli_args;
mod host;
mod picker;

fn execute() -> Result<()> {
    let args = Args::parse();
    let shell = env::var("SHELL").unwrap_or_else(|_| DEFAULT_SHELL.to_string());

    let settings_path = config::get_settings_path(&args.config_path);
    debug!("Settings path: `{settings_path}`");
    let settings = Settings::load(&settings_path)?;
    debug!("Loaded commands: {}", settings.commands.keys().join(", "));

    let state_path = config::get_state_path(&args.state_path);
    let mut store = FileStateStore::new(state_path);

    let defaults = settings.terminal.clone();
    let auto_append = settings.auto_append_selected_files;
    let accessor = HostAccessor::new(settings, shell.clone());
    let provider = ShellSessionProvider::new(shell);
    let executor = Executor::new(&accessor, &provider, defaults, auto_append);

    let caller = args.terminal_options();
    let files = args.quoted_files();

    let raw = if args.select_text {
        accessor
            .variable(scopes::SELECTED_TEXT_SECTION)
            .unwrap_or_default()
    } else if let Some(name) = &args.command_name {
        select::lookup_named(&accessor, &mut store, name)?
    } else {
        match select::pick_command(&QuickPick, &mut store, &accessor)? {
            Some((name, raw)) => {
                debug!("Picked `{name}`");
                raw
            }
            None => return Ok(()),
        }
    };

    if args.dry_run {
        println!("{}", executor.compose_and_resolve(&raw, &files)?);
        return Ok(());
    }

    executor.execute(&raw, &caller, &files)?;

    // The session's shell exits on its own (`; exit`); stay alive until it
    // does so close handling can run.
    provider.wait_all();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
