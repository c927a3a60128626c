//! Log setup
//!
//! Three layers share one registry:
//!
//! - stderr: warnings and errors, always
//! - stdout: progress (`debug!`/`info!`), with `--verbose` only
//! - file: everything, including result lines, with `--log`
//!
//! Result lines are printed by the command itself and mirrored to the log
//! under [`RESULT_TARGET`], which the stdout layer skips.

use crate::artifacts::tags::tag_commit::ISO_OUTPUT_FORMAT;
use crate::errors::TrackerError;
use anyhow::Context;
use chrono::{DateTime, Local};
use is_terminal::IsTerminal;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::filter::{LevelFilter, filter_fn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Target of the events that mirror result lines
pub const RESULT_TARGET: &str = "hgtrack::result";

pub fn init(verbose: bool, log_file: Option<File>) -> anyhow::Result<()> {
    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .with_filter(LevelFilter::WARN);

    let stdout = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(std::io::stdout().is_terminal())
            .with_target(false)
            .without_time()
            .with_level(false)
            .with_filter(filter_fn(|meta| {
                meta.target() != RESULT_TARGET
                    && (*meta.level() == Level::DEBUG || *meta.level() == Level::INFO)
            }))
    });

    let file = log_file.map(|file| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
            .with_filter(filter)
    });

    tracing_subscriber::registry()
        .with(stderr)
        .with(stdout)
        .with(file)
        .try_init()
        .context("failed to install the log subscriber")
}

/// Resolve the `--log` argument to an open file
///
/// A directory gets a new `hgtrack-<timestamp>.log`; anything else is opened
/// for appending, provided its directory exists.
pub fn open_log_file(path: &Path, now: DateTime<Local>) -> anyhow::Result<(PathBuf, File)> {
    let path = std::path::absolute(path)
        .with_context(|| format!("cannot resolve log path {}", path.display()))?;

    let target = if path.is_dir() {
        path.join(format!("hgtrack-{}.log", now.format(ISO_OUTPUT_FORMAT)))
    } else {
        match path.parent() {
            Some(parent) if parent.is_dir() => path,
            _ => return Err(TrackerError::MissingLogDir(path).into()),
        }
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&target)
        .with_context(|| format!("cannot open log file {}", target.display()))?;

    Ok((target, file))
}
