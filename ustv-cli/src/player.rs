use std::{path::Path, process::Command};
use tracing::debug;

use crate::error::{CliError, Result};

/// Open `path` with `player` (a program plus optional arguments) or with the
/// platform's default handler, waiting for the command to return.
pub fn open(path: &Path, player: Option<&str>) -> Result<()> {
    let mut command = match player {
        Some(player) => player_command(player, path)?,
        None => default_opener(path),
    };
    debug!("Running {:?}", command);

    let status = command.status()?;
    if !status.success() {
        return Err(CliError::Player {
            program: command.get_program().to_string_lossy().into_owned(),
            status,
        });
    }
    Ok(())
}

fn player_command(player: &str, path: &Path) -> Result<Command> {
    let mut parts = player.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| CliError::invalid_input("empty player command"))?;
    let mut command = Command::new(program);
    command.args(parts).arg(path);
    Ok(command)
}

fn default_opener(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else if cfg!(windows) {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}
