//! Logging setup
//!
//! Turns the standard logging flags into a `tracing-subscriber` registry with
//! a stderr layer, an optional log file layer, and an `EnvFilter`.

use crate::error::{Result, SuperCliError};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Verbosity levels for log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    #[default]
    Normal = 0,
    Verbose = 1,
    /// Debug output with the quiet-target filters removed
    VeryVerbose = 2,
}

impl Verbosity {
    /// Map a `-v` occurrence count to a verbosity
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        }
    }

    pub fn level(self) -> Level {
        match self {
            Verbosity::Normal => Level::INFO,
            Verbosity::Verbose | Verbosity::VeryVerbose => Level::DEBUG,
        }
    }
}

/// Layout of each log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Timestamp, level and message
    #[default]
    Standard,
    /// Target and line number instead of the timestamp
    Dev,
    /// Multi-line records with every field
    Long,
}

/// Logging configuration gathered from command-line flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub verbosity: Verbosity,
    pub format: LogFormat,
    /// Also append records to this file
    pub logfile: Option<PathBuf>,
    /// Log to stderr
    pub stream: bool,
    /// Targets held at `warn` unless running very verbose
    pub quiet_targets: Vec<String>,
}

impl LogConfig {
    pub fn new() -> Self {
        LogConfig {
            verbosity: Verbosity::Normal,
            format: LogFormat::Standard,
            logfile: None,
            stream: true,
            quiet_targets: Vec::new(),
        }
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_logfile(mut self, path: PathBuf) -> Self {
        self.logfile = Some(path);
        self
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_quiet_targets(mut self, targets: Vec<String>) -> Self {
        self.quiet_targets = targets;
        self
    }

    /// Filter directives on top of the default level
    pub fn directives(&self) -> Vec<String> {
        if self.verbosity == Verbosity::VeryVerbose {
            return Vec::new();
        }
        self.quiet_targets
            .iter()
            .map(|target| format!("{}=warn", target))
            .collect()
    }

    fn filter(&self) -> Result<EnvFilter> {
        let mut filter = EnvFilter::builder()
            .with_default_directive(self.verbosity.level().into())
            .from_env_lossy();

        for directive in self.directives() {
            let parsed = directive
                .parse()
                .map_err(|e| SuperCliError::Logging(format!("Bad filter '{}': {}", directive, e)))?;
            filter = filter.add_directive(parsed);
        }

        Ok(filter)
    }

    /// Install the global subscriber
    pub fn init(&self) -> Result<()> {
        let mut layers: Vec<BoxedLayer> = Vec::new();

        if self.stream {
            layers.push(format_layer(self.format, fmt::layer().with_writer(std::io::stderr)));
        }

        if let Some(path) = &self.logfile {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            layers.push(format_layer(
                self.format,
                fmt::layer().with_ansi(false).with_writer(Mutex::new(file)),
            ));
        }

        tracing_subscriber::registry()
            .with(layers)
            .with(self.filter()?)
            .try_init()
            .map_err(|e| SuperCliError::Logging(e.to_string()))
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn format_layer<W>(format: LogFormat, layer: fmt::Layer<Registry, fmt::format::DefaultFields, fmt::format::Format, W>) -> BoxedLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Standard => layer.boxed(),
        LogFormat::Dev => layer
            .without_time()
            .with_target(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Long => layer
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .boxed(),
    }
}
