//! Running hledger.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// The reports ledgermetrics needs from hledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    /// Cumulative daily balances per account.
    Balances,
    /// Daily transaction sums per account.
    Transactions,
    /// Every market price in the journal.
    Prices,
    /// Monthly budget against actuals per account.
    Budget,
}

impl Query {
    /// Arguments passed to hledger for this report.
    pub const fn args(self) -> &'static [&'static str] {
        match self {
            Self::Balances => &[
                "balance",
                "--daily",
                "--cumulative",
                "--output-format",
                "csv",
            ],
            Self::Transactions => &["balance", "--daily", "--output-format", "csv"],
            Self::Prices => &["prices"],
            Self::Budget => &[
                "balance",
                "--budget",
                "--monthly",
                "--output-format",
                "csv",
            ],
        }
    }
}

/// Errors from running a report.
#[derive(Debug, Error)]
pub enum SourceError {
    /// hledger could not be started.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// The command line.
        command: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// hledger exited unsuccessfully.
    #[error("`{command}` failed ({status}): {stderr}")]
    Failed {
        /// The command line.
        command: String,
        /// Exit status.
        status: ExitStatus,
        /// Captured standard error.
        stderr: String,
    },

    /// hledger wrote something that is not UTF-8.
    #[error("`{command}` produced output that is not valid UTF-8")]
    Utf8 {
        /// The command line.
        command: String,
    },
}

/// Something that can answer report queries.
///
/// Queries may be issued from several threads at once.
pub trait LedgerSource: Sync {
    /// Run a report and return its raw output.
    fn query(&self, query: Query) -> Result<String, SourceError>;
}

/// The hledger executable, optionally pinned to one journal file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hledger {
    program: OsString,
    file: Option<PathBuf>,
}

impl Hledger {
    /// Use the given executable.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            file: None,
        }
    }

    /// Pass `--file <path>` to every query.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    fn args(&self, query: Query) -> Vec<OsString> {
        let mut args = Vec::new();
        if let Some(file) = &self.file {
            args.push(OsString::from("--file"));
            args.push(file.clone().into_os_string());
        }
        args.extend(query.args().iter().map(OsString::from));
        args
    }

    fn command_line(&self, args: &[OsString]) -> String {
        std::iter::once(&self.program)
            .chain(args)
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Hledger {
    fn default() -> Self {
        Self::new("hledger")
    }
}

impl LedgerSource for Hledger {
    fn query(&self, query: Query) -> Result<String, SourceError> {
        let args = self.args(query);
        let command = self.command_line(&args);
        tracing::info!(%command, "running hledger");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| SourceError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SourceError::Failed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        tracing::debug!(%command, bytes = output.stdout.len(), "hledger finished");
        String::from_utf8(output.stdout).map_err(|_| SourceError::Utf8 { command })
    }
}
