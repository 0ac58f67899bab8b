use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::info;

use crate::error::{ActionError, ActionResult};

/// One external invocation: program, arguments, extra
/// environment entries, and an optional working directory.
/// Environment entries apply to this invocation only.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            envs: Vec::new(),
            cwd: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.cwd = dir;
        self
    }

    /// Program and arguments joined for log lines and failure
    /// messages. Environment entries are never included.
    #[must_use]
    pub fn display_line(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Result of a streamed invocation. A non-zero code is data
/// here, not an error; the caller applies its own policy.
#[derive(Debug, Clone)]
pub struct Captured {
    pub code: i32,
    pub stdout: String,
}

impl Captured {
    #[must_use]
    pub const fn success(&self) -> bool {
        self.code == 0
    }
}

/// Seam between the pipeline and real subprocesses. Tests
/// substitute a scripted implementation.
pub trait CommandRunner {
    /// Run the command, forwarding each stdout/stderr line to
    /// the log as it arrives while accumulating stdout for
    /// later extraction.
    fn run_streamed(&self, spec: &CommandSpec) -> ActionResult<Captured>;

    /// Run the command and return its trimmed stdout. Fails if
    /// the command exits non-zero.
    fn run_captured(&self, spec: &CommandSpec) -> ActionResult<String>;
}

/// [`CommandRunner`] backed by `std::process`.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run_streamed(&self, spec: &CommandSpec) -> ActionResult<Captured> {
        let mut child = build(spec)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(&spec.program, &e))?;

        // Both pipes must be drained or the child can block on
        // a full buffer. stderr goes to a helper thread; stdout
        // is read here because it is also kept for extraction.
        let stderr = child.stderr.take();
        let stderr_thread = std::thread::spawn(move || {
            if let Some(stderr) = stderr {
                for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                    info!("{line}");
                }
            }
        });

        let mut stdout_buf = String::new();
        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                let line = line?;
                info!("{line}");
                stdout_buf.push_str(&line);
                stdout_buf.push('\n');
            }
        }

        let status = child.wait()?;
        let _ = stderr_thread.join();

        Ok(Captured {
            code: status.code().unwrap_or(-1),
            stdout: stdout_buf,
        })
    }

    fn run_captured(&self, spec: &CommandSpec) -> ActionResult<String> {
        let output = build(spec)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| spawn_error(&spec.program, &e))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(ActionError::CommandFailed {
                command: spec.display_line(),
                code: output.status.code().unwrap_or(-1),
            })
        }
    }
}

fn build(spec: &CommandSpec) -> Command {
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);
    for (key, value) in &spec.envs {
        cmd.env(key, value);
    }
    if let Some(cwd) = &spec.cwd {
        cmd.current_dir(cwd);
    }
    cmd
}

fn spawn_error(program: &str, e: &std::io::Error) -> ActionError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ActionError::CommandNotFound(program.to_string())
    } else {
        ActionError::Other(format!("failed to spawn '{program}': {e}"))
    }
}
