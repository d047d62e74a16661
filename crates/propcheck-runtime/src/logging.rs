//! Logging setup over `tracing-subscriber`.
//!
//! Nothing in propcheck prints on its own. Empty-value findings are WARN
//! events from `propcheck_core::audit`, skipped files are WARN events from
//! the startup check, and every composite load runs inside a DEBUG `load`
//! span carrying `source` and `file`. The subscriber installed here decides
//! which of those are shown and where.
//!
//! ```rust,ignore
//! use propcheck_runtime::{config::load_config, logging};
//!
//! // From the `[logging]` section of the checker configuration
//! let config = load_config()?;
//! logging::init_from_config(&config.logging);
//!
//! // Or by hand: per-file load spans with their timings
//! logging::LoggingBuilder::new()
//!     .directive("propcheck_core=debug")
//!     .span_events(logging::SpanEvents::LIFECYCLE)
//!     .init();
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{Level, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LogOutput, LoggingConfig, SpanEventConfig};

/// Default file name when the configured log path has none.
const DEFAULT_LOG_FILE: &str = "propcheck.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Which span transitions are logged.
///
/// The interesting span is `load`: one per file and strategy dispatch. Its
/// close event carries the time spent loading that file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanEvents {
    pub new: bool,
    pub enter: bool,
    pub exit: bool,
    pub close: bool,
}

impl SpanEvents {
    pub const NONE: Self = Self {
        new: false,
        enter: false,
        exit: false,
        close: false,
    };

    /// Creation and close, i.e. one line when a file starts loading and one
    /// with its timing when it is done.
    pub const LIFECYCLE: Self = Self {
        new: true,
        close: true,
        ..Self::NONE
    };

    pub const FULL: Self = Self {
        new: true,
        enter: true,
        exit: true,
        close: true,
    };
}

impl From<SpanEvents> for FmtSpan {
    fn from(events: SpanEvents) -> Self {
        [
            (events.new, FmtSpan::NEW),
            (events.enter, FmtSpan::ENTER),
            (events.exit, FmtSpan::EXIT),
            (events.close, FmtSpan::CLOSE),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .fold(FmtSpan::NONE, |acc, (_, span)| acc | span)
    }
}

impl From<&SpanEventConfig> for SpanEvents {
    fn from(config: &SpanEventConfig) -> Self {
        Self {
            new: config.new,
            enter: config.enter,
            exit: config.exit,
            close: config.close,
        }
    }
}

/// Installs the global subscriber described by `config`.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = LoggingBuilder::from_config(config).try_init();
}

/// Builds and installs the global `tracing` subscriber.
#[derive(Debug)]
pub struct LoggingBuilder {
    level: Level,
    directives: Vec<String>,
    span_events: SpanEvents,
    format: LogFormat,
    output: LogOutput,
    file_path: Option<PathBuf>,
    with_target: bool,
    with_thread_ids: bool,
    with_file_location: bool,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingBuilder {
    /// INFO and above, compact lines on stderr.
    pub fn new() -> Self {
        Self {
            level: Level::INFO,
            directives: Vec::new(),
            span_events: SpanEvents::NONE,
            format: LogFormat::Compact,
            output: LogOutput::Stderr,
            file_path: None,
            with_target: true,
            with_thread_ids: false,
            with_file_location: false,
        }
    }

    /// WARN and above without targets: findings and skipped files only.
    pub fn findings_only() -> Self {
        Self {
            level: Level::WARN,
            with_target: false,
            ..Self::new()
        }
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        // Sorted so the filter does not depend on map order.
        let mut filters: Vec<_> = config.filters.iter().collect();
        filters.sort_by(|a, b| a.0.cmp(b.0));

        Self {
            level: config.level.to_tracing_level(),
            directives: filters
                .into_iter()
                .map(|(target, level)| format!("{target}={level}"))
                .collect(),
            span_events: SpanEvents::from(&config.span_events),
            format: config.format,
            output: config.output,
            file_path: config.file_path.clone(),
            with_target: true,
            with_thread_ids: config.thread_ids,
            with_file_location: config.file_location,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Adds a filter directive such as `propcheck_loaders=trace`.
    ///
    /// Directives that do not parse are ignored.
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    pub fn span_events(mut self, events: SpanEvents) -> Self {
        self.span_events = events;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Log file for [`LogOutput::File`]. The file is appended to, never rotated.
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    pub fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.with_thread_ids = enabled;
        self
    }

    /// Includes source file and line of each event.
    pub fn with_file_location(mut self, enabled: bool) -> Self {
        self.with_file_location = enabled;
        self
    }

    /// Filter directives in the order they are applied.
    pub fn directives(&self) -> &[String] {
        &self.directives
    }

    /// Installs the subscriber, ignoring one already in place.
    pub fn init(self) {
        let _ = self.try_init();
    }

    pub fn try_init(self) -> Result<(), TryInitError> {
        let filter = self.filter();
        tracing_subscriber::registry()
            .with(self.layer())
            .with(filter)
            .try_init()
    }

    /// `RUST_LOG` if set, else the configured level, plus the directives.
    fn filter(&self) -> EnvFilter {
        let base = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_str().to_lowercase()));

        self.directives
            .iter()
            .filter_map(|directive| directive.parse::<Directive>().ok())
            .fold(base, EnvFilter::add_directive)
    }

    fn layer(&self) -> BoxedLayer {
        let layer = fmt::layer()
            .with_writer(self.writer())
            .with_span_events(self.span_events.into())
            .with_target(self.with_target)
            .with_thread_ids(self.with_thread_ids)
            .with_file(self.with_file_location)
            .with_line_number(self.with_file_location);

        match self.format {
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
            #[cfg(feature = "json-log")]
            LogFormat::Json => layer.json().boxed(),
            // Rejected by config validation; full lines when built by hand.
            #[cfg(not(feature = "json-log"))]
            LogFormat::Json => layer.boxed(),
            LogFormat::Full => layer.boxed(),
        }
    }

    fn writer(&self) -> BoxMakeWriter {
        match (self.output, &self.file_path) {
            (LogOutput::Stdout, _) => BoxMakeWriter::new(std::io::stdout),
            (LogOutput::Stderr, _) => BoxMakeWriter::new(std::io::stderr),
            (LogOutput::File, Some(path)) => {
                let (dir, file) = split_log_path(path);
                BoxMakeWriter::new(tracing_appender::rolling::never(dir, file))
            }
            (LogOutput::File, None) => {
                warn!("File output requested but no file path configured, using stderr");
                BoxMakeWriter::new(std::io::stderr)
            }
        }
    }
}

fn split_log_path(path: &Path) -> (&Path, &OsStr) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file = path
        .file_name()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE));
    (dir, file)
}
