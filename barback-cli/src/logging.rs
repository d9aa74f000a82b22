//! Logger setup.
//!
//! All user-facing output goes through the `log` macros and lands on
//! stderr, which keeps stdout free for `convert --stdout`.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use env_logger::{Builder, Env, Target};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::CliError;

/// Install the global logger.
///
/// Default level is `info`; `--verbose` switches to `debug` with timestamps
/// and module paths, `--quiet` to `warn`. `RUST_LOG` applies when neither
/// flag is given.
pub(crate) fn init_logger(
    quiet: bool,
    verbose: bool,
    logfile: Option<&Path>,
) -> Result<(), CliError> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(level.as_str()));
    if verbose || quiet {
        builder.filter_level(level);
    }

    builder.format(move |buf, record| {
        if verbose {
            return writeln!(
                buf,
                "[{} {:<5} {}] {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.module_path().unwrap_or(""),
                record.args()
            );
        }
        match record.level() {
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stderr, |t| t.red()),
                record.args()
            ),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stderr, |t| t.yellow()),
                record.args()
            ),
            _ => writeln!(buf, "{}", record.args()),
        }
    });

    match logfile {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    CliError::other(format!("Cannot open log file {}: {}", path.display(), e))
                })?;
            builder.target(Target::Pipe(Box::new(TeeWriter { file })));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| CliError::other(format!("Failed to initialize logging: {}", e)))
}

/// Writes each record to stderr as-is and to the log file without ANSI codes.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(&strip_ansi_escapes::strip(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}
