//! External command invocation
//!
//! Collaborator tools (`gh`, `mvn`) are run to completion and their output is
//! captured line by line into a [`ScriptResult`].

use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;
use tokio::process::Command;
use tracing::trace;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The tool is not installed
    #[error("{0} not found in $PATH")]
    Unavailable(String),

    /// The tool could not be started
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// The tool exited unsuccessfully
    #[error("{command} exited with status {status}\nstdout:\n{stdout}\nstderr:\n{stderr}")]
    Failed {
        command: String,
        status: i32,
        stdout: String,
        stderr: String,
    },
}

/// Captured outcome of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptResult {
    pub command: String,
    /// Exit status, `-1` when the process was terminated by a signal
    pub status: i32,
    pub out: Vec<String>,
    pub err: Vec<String>,
}

impl ScriptResult {
    pub fn new(command: impl Into<String>, status: i32, out: Vec<String>, err: Vec<String>) -> Self {
        Self {
            command: command.into(),
            status,
            out,
            err,
        }
    }

    pub fn ok(&self) -> bool {
        self.status == 0
    }

    /// Turn a non-zero exit into [`ProcessError::Failed`] carrying the captured output
    pub fn assert_ok(self) -> Result<Self, ProcessError> {
        if self.ok() {
            Ok(self)
        } else {
            Err(ProcessError::Failed {
                command: self.command,
                status: self.status,
                stdout: self.out.join("\n"),
                stderr: self.err.join("\n"),
            })
        }
    }

    /// First line of standard output, empty when nothing was printed
    pub fn first_line(&self) -> &str {
        self.out.first().map(String::as_str).unwrap_or_default()
    }
}

/// Trait for running external commands
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    /// Fail with [`ProcessError::Unavailable`] when `program` cannot be found
    fn ensure_available(&self, program: &str) -> Result<(), ProcessError>;

    /// Run `program` with `args` to completion, capturing stdout and stderr
    async fn run(&self, program: &str, args: &[String]) -> Result<ScriptResult, ProcessError>;
}

/// Runs commands as child processes of this one
#[derive(Debug, Default, Clone)]
pub struct SystemCommandRunner;

#[async_trait::async_trait]
impl CommandRunner for SystemCommandRunner {
    fn ensure_available(&self, program: &str) -> Result<(), ProcessError> {
        find_on_path(program)
            .map(|_| ())
            .ok_or_else(|| ProcessError::Unavailable(program.to_string()))
    }

    async fn run(&self, program: &str, args: &[String]) -> Result<ScriptResult, ProcessError> {
        let command_line = std::iter::once(program)
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        trace!("{}", command_line);

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    ProcessError::Unavailable(program.to_string())
                } else {
                    ProcessError::Spawn {
                        command: command_line.clone(),
                        source,
                    }
                }
            })?;

        Ok(ScriptResult::new(
            command_line,
            output.status.code().unwrap_or(-1),
            lines(&output.stdout),
            lines(&output.stderr),
        ))
    }
}

fn lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Locate `program` in the directories listed in `PATH`
fn find_on_path(program: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    let extensions: Vec<String> = if cfg!(windows) {
        std::env::var("PATHEXT")
            .unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string())
            .split(';')
            .map(|s| s.to_ascii_lowercase())
            .collect()
    } else {
        vec![String::new()]
    };

    std::env::split_paths(&path_var).find_map(|dir| {
        extensions
            .iter()
            .map(|ext| dir.join(format!("{}{}", program, ext)))
            .find(|candidate| candidate.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assert_ok_passes_successful_result_through() {
        let result = ScriptResult::new("gh pr view", 0, vec!["title".to_string()], vec![]);

        assert_eq!(result.clone().assert_ok().unwrap(), result);
    }

    #[test]
    fn assert_ok_carries_captured_output() {
        let result = ScriptResult::new(
            "mvn dependency:list",
            1,
            vec!["[ERROR] build failed".to_string()],
            vec!["boom".to_string(), "again".to_string()],
        );

        match result.assert_ok() {
            Err(ProcessError::Failed {
                command,
                status,
                stdout,
                stderr,
            }) => {
                assert_eq!(command, "mvn dependency:list");
                assert_eq!(status, 1);
                assert_eq!(stdout, "[ERROR] build failed");
                assert_eq!(stderr, "boom\nagain");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn first_line_is_empty_without_output() {
        assert_eq!(ScriptResult::new("gh", 0, vec![], vec![]).first_line(), "");
    }

    #[test]
    fn ensure_available_rejects_unknown_program() {
        let runner = SystemCommandRunner;

        assert!(matches!(
            runner.ensure_available("definitely-not-a-real-tool-4f1c2a"),
            Err(ProcessError::Unavailable(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn run_captures_stdout_and_status() {
        let runner = SystemCommandRunner;

        let result = runner
            .run("sh", &["-c".to_string(), "echo one; echo two; exit 3".to_string()])
            .await
            .unwrap();

        assert_eq!(result.out, vec!["one", "two"]);
        assert_eq!(result.status, 3);
        assert!(!result.ok());
    }

    #[tokio::test]
    async fn run_reports_missing_program_as_unavailable() {
        let runner = SystemCommandRunner;

        let result = runner.run("definitely-not-a-real-tool-4f1c2a", &[]).await;

        assert!(matches!(result, Err(ProcessError::Unavailable(_))));
    }
}
