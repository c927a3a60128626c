use anyhow::Context;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What `hg log` returned for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOutput {
    pub status: i32,
    pub stdout: String,
}

impl LogOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        LogOutput {
            status: 0,
            stdout: stdout.into(),
        }
    }
}

/// Runs the history listing of a repository directory
pub trait LogSource {
    /// Name reported when the listing fails
    fn program(&self) -> &str;

    fn run_log(&self, dir: &Path) -> anyhow::Result<LogOutput>;
}

/// `hg log` run as a child process in the repository directory
#[derive(Debug, Clone)]
pub struct HgCommand {
    program: String,
}

impl HgCommand {
    pub fn new(program: impl Into<String>) -> Self {
        HgCommand {
            program: program.into(),
        }
    }
}

impl LogSource for HgCommand {
    fn program(&self) -> &str {
        &self.program
    }

    fn run_log(&self, dir: &Path) -> anyhow::Result<LogOutput> {
        tracing::debug!("running {} log in {}", self.program, dir.display());

        let output = Command::new(&self.program)
            .arg("log")
            .current_dir(dir)
            .output()
            .with_context(|| format!("failed to run {} in {}", self.program, dir.display()))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::debug!("{} log stderr: {}", self.program, stderr.trim());
        }

        Ok(LogOutput {
            // killed by a signal
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// Canned listings keyed by repository directory
#[derive(Debug, Clone, Default)]
pub struct InMemoryLogs {
    logs: HashMap<PathBuf, LogOutput>,
}

impl InMemoryLogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(mut self, dir: impl Into<PathBuf>, output: LogOutput) -> Self {
        self.logs.insert(dir.into(), output);
        self
    }
}

impl LogSource for InMemoryLogs {
    fn program(&self) -> &str {
        "in-memory"
    }

    fn run_log(&self, dir: &Path) -> anyhow::Result<LogOutput> {
        self.logs
            .get(dir)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no log recorded for {}", dir.display()))
    }
}
