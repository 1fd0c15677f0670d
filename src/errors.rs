//! Error types with rich diagnostics using miette
//!
//! Parse and build errors carry source spans for readable error messages.
//! Chart and configuration errors are plain values; when they come from a
//! chart description they are wrapped in a [`BuildError`] that points at the
//! offending statement.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur during parsing
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("syntax error: {message}")]
    #[diagnostic(code(ganttline::parse::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid date: {text}")]
    #[diagnostic(
        code(ganttline::parse::invalid_date),
        help("dates are written as YYYY-MM-DD")
    )]
    InvalidDate {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a calendar date")]
        span: SourceSpan,
    },

    #[error("invalid number: {text}")]
    #[diagnostic(code(ganttline::parse::invalid_number))]
    InvalidNumber {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid number")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// Convert a pest error, keeping its position as the label span.
    pub(crate) fn from_pest(err: pest::error::Error<crate::Rule>, ctx: &SourceContext) -> Self {
        let (start, end) = match err.location {
            pest::error::InputLocation::Pos(pos) => (pos, pos),
            pest::error::InputLocation::Span((start, end)) => (start, end),
        };
        let message = err.variant.message().into_owned();
        ParseError::Syntax {
            message,
            src: ctx.named_source(),
            span: (start, end.saturating_sub(start)).into(),
        }
    }
}

// ============================================================================
// Chart Errors
// ============================================================================

/// Invalid chart mutations
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("task `{name}` already exists")]
    #[diagnostic(code(ganttline::chart::duplicate_task))]
    DuplicateTask { name: String },

    #[error("unknown task `{name}`")]
    #[diagnostic(code(ganttline::chart::unknown_task))]
    UnknownTask { name: String },

    #[error("task `{name}` cannot depend on itself")]
    #[diagnostic(code(ganttline::chart::self_dependency))]
    SelfDependency { name: String },

    #[error("dependency `{source_task}` -> `{target}` already exists")]
    #[diagnostic(code(ganttline::chart::duplicate_dependency))]
    DuplicateDependency { source_task: String, target: String },

    #[error("row {row} is already used by `{owner}`")]
    #[diagnostic(
        code(ganttline::chart::row_taken),
        help("every task needs its own row; omit `row` to use the next free one")
    )]
    RowTaken { row: u32, owner: String },

    #[error("row {row} of `{name}` is past the last usable row {max}")]
    #[diagnostic(code(ganttline::chart::row_out_of_range))]
    RowOutOfRange { name: String, row: u32, max: u32 },

    #[error("task `{name}` ends before it starts")]
    #[diagnostic(code(ganttline::chart::end_before_start))]
    EndBeforeStart { name: String },

    #[error("progress {progress} of `{name}` is outside 0..=1")]
    #[diagnostic(code(ganttline::chart::progress_out_of_range))]
    ProgressOutOfRange { name: String, progress: f64 },

    #[error("no dependency `{source_task}` -> `{target}`")]
    #[diagnostic(code(ganttline::chart::unknown_dependency))]
    UnknownDependency { source_task: String, target: String },
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Invalid routing or rendering settings
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid {setting}: {source}")]
    #[diagnostic(code(ganttline::config::invalid_value))]
    InvalidValue {
        setting: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("corner radius {radius} is more than half the clearance {clearance}")]
    #[diagnostic(
        code(ganttline::config::radius_too_large),
        help("two corners must fit inside one clearance")
    )]
    RadiusTooLarge { radius: f64, clearance: f64 },

    #[error("corner radius {radius} does not fit twice between bars of half height {half_height}")]
    #[diagnostic(
        code(ganttline::config::radius_exceeds_row_gap),
        help("a connector between adjacent rows turns twice in the gap between their bars")
    )]
    RadiusExceedsRowGap { radius: f64, half_height: f64 },

    #[error("curve factor {factor} is outside (0, 1]")]
    #[diagnostic(code(ganttline::config::curve_factor))]
    CurveFactor { factor: f64 },

    #[error("bar half height {half_height} would make adjacent rows touch")]
    #[diagnostic(code(ganttline::config::bar_too_tall))]
    BarTooTall { half_height: f64 },

    #[error("unknown setting `{name}`")]
    #[diagnostic(
        code(ganttline::config::unknown_setting),
        help("known settings: clearance, radius, curve, bar_height, corridor, arrow, window")
    )]
    UnknownSetting { name: String },
}

impl ConfigError {
    pub(crate) fn invalid(setting: &'static str, source: NumericError) -> Self {
        ConfigError::InvalidValue { setting, source }
    }
}

// ============================================================================
// Build Errors
// ============================================================================

/// A chart or configuration error raised while applying a statement.
#[derive(Error, Diagnostic, Debug)]
pub enum BuildError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Chart(ChartErrorAt),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(ConfigErrorAt),
}

/// A [`ChartError`] located in the source.
#[derive(Error, Diagnostic, Debug)]
#[error("{error}")]
#[diagnostic(code(ganttline::build::chart))]
pub struct ChartErrorAt {
    #[diagnostic_source]
    pub error: ChartError,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("in this statement")]
    pub span: SourceSpan,
}

/// A [`ConfigError`] located in the source.
#[derive(Error, Diagnostic, Debug)]
#[error("{error}")]
#[diagnostic(code(ganttline::build::config))]
pub struct ConfigErrorAt {
    #[diagnostic_source]
    pub error: ConfigError,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("in this setting")]
    pub span: SourceSpan,
}

impl BuildError {
    pub(crate) fn chart(error: ChartError, ctx: &SourceContext, span: SourceSpan) -> Self {
        BuildError::Chart(ChartErrorAt {
            error,
            src: ctx.named_source(),
            span,
        })
    }

    pub(crate) fn config(error: ConfigError, ctx: &SourceContext, span: SourceSpan) -> Self {
        BuildError::Config(ConfigErrorAt {
            error,
            src: ctx.named_source(),
            span,
        })
    }
}
