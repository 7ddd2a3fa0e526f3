// src/system/shell.rs

use std::{collections::HashMap, path::Path};
use tokio::process::Command;

/// The host shell program and the flag that makes it run a single command line.
pub fn host_shell() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}

/// Builds a command that hands `command_line` to the host shell untouched, so
/// pipes, redirections and multi-line script bodies behave as in a terminal.
pub fn shell_command(
    command_line: &str,
    cwd: &Path,
    env_vars: &HashMap<String, String>,
) -> Command {
    let (program, flag) = host_shell();
    let mut command = Command::new(program);
    command
        .arg(flag)
        .arg(command_line)
        .current_dir(dunce::simplified(cwd))
        .envs(env_vars);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_host_shell_on_unix() {
        assert_eq!(host_shell(), ("sh", "-c"));
    }

    #[test]
    fn test_shell_command_passes_line_as_single_argument() {
        let cmd = shell_command("echo a | wc -c", Path::new("."), &HashMap::new());
        let args: Vec<_> = cmd.as_std().get_args().collect();
        assert_eq!(args.len(), 2);
        assert_eq!(args[1], "echo a | wc -c");
    }
}
