use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LogsConfig {
    #[serde(default = "LogLevel::default")]
    pub level: LogLevel,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub enum LogLevel {
    #[serde(rename = "error")]
    Error,

    #[serde(rename = "info")]
    #[default]
    Info,

    #[serde(rename = "debug")]
    Debug,
}

/// Install the global logger before any config is read, so that messages from
/// config loading are not lost. Logs go to stderr so that command output on
/// stdout stays clean.
///
/// The dispatcher accepts everything up to debug, the effective level is the
/// global max level: info by default, debug with `debug`. Call
/// [`LogsConfig::apply`] once the config is loaded.
pub fn init(debug: bool) -> Result<()> {
    let is_terminal = io::stderr().is_terminal();

    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .debug(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let now = humantime::format_rfc3339_millis(std::time::SystemTime::now());
            if is_terminal {
                out.finish(format_args!(
                    "{now} [{}] {message}",
                    colors.color(record.level())
                ))
            } else {
                out.finish(format_args!("{now} [{}] {message}", record.level()))
            }
        })
        .level(LevelFilter::Debug)
        .level_for("reqwest", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn)
        .chain(io::stderr())
        .apply()
        .context("init logger")?;

    log::set_max_level(LogsConfig::default().level_filter(debug));
    Ok(())
}

impl LogsConfig {
    /// Switch the installed logger to the configured level. `debug` from the
    /// command line wins over the config.
    pub fn apply(&self, debug: bool) {
        log::set_max_level(self.level_filter(debug));
    }

    fn level_filter(&self, debug: bool) -> LevelFilter {
        if debug {
            return LevelFilter::Debug;
        }
        match self.level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
        }
    }
}
