//! Post-scaffold dependency installation
//!
//! Runs the configured install commands (npm, bower) inside the new project.
//! This happens after materialization and never fails the run: a missing
//! tool or a failing command is reported and the next command still runs.

use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// Result of running one install command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Succeeded { command: String },
    Failed { command: String, reason: String },
}

impl InstallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Run each command in `dir`, in order
pub fn install_dependencies(commands: &[String], dir: &Path) -> Vec<InstallOutcome> {
    commands.iter().map(|command| run_one(command, dir)).collect()
}

fn run_one(command: &str, dir: &Path) -> InstallOutcome {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        return InstallOutcome::Failed {
            command: command.to_string(),
            reason: "empty command".to_string(),
        };
    };

    info!(command, dir = %dir.display(), "running install command");

    let status = Command::new(program)
        .args(parts)
        .current_dir(dir)
        .stdin(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => InstallOutcome::Succeeded {
            command: command.to_string(),
        },
        Ok(status) => {
            let reason = match status.code() {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            };
            warn!(command, %reason, "install command failed");
            InstallOutcome::Failed {
                command: command.to_string(),
                reason,
            }
        }
        Err(e) => {
            warn!(command, error = %e, "could not start install command");
            InstallOutcome::Failed {
                command: command.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_no_commands() {
        let dir = tempdir().unwrap();
        assert!(install_dependencies(&[], dir.path()).is_empty());
    }

    #[test]
    fn test_missing_program_does_not_stop_later_commands() {
        let dir = tempdir().unwrap();
        let commands = vec![
            "definitely-not-a-real-installer-xwf install".to_string(),
            "   ".to_string(),
        ];

        let outcomes = install_dependencies(&commands, dir.path());

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| !o.is_success()));
        assert!(matches!(
            &outcomes[1],
            InstallOutcome::Failed { reason, .. } if reason == "empty command"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_in_project_dir() {
        let dir = tempdir().unwrap();
        let commands = vec!["touch installed.marker".to_string(), "false".to_string()];

        let outcomes = install_dependencies(&commands, dir.path());

        assert!(outcomes[0].is_success());
        assert!(dir.path().join("installed.marker").exists());
        assert!(matches!(
            &outcomes[1],
            InstallOutcome::Failed { reason, .. } if reason == "exited with status 1"
        ));
    }
}
