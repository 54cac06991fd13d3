use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{check::check, fix::fix, init::init, rules::rules},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler.
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Fix(cmd)) => fix(cmd),
        Some(Command::Init) => init(),
        Some(Command::Rules) => rules(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
