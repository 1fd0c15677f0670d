//! Abstract Syntax Tree types for chart descriptions
//!
//! These types represent the parsed structure of a `.gantt` file. Dates are
//! already validated; everything else is checked when the chart is built.

use chrono::NaiveDate;
use miette::SourceSpan;

/// A complete chart description
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// One statement together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// task "Design" from 2024-11-03 to 2024-11-10 row 2 progress 40%
    Task(TaskDecl),
    /// Design -> Build
    Dependency(DependencyDecl),
    /// clearance = 0.25
    Setting(Setting),
    /// scroll x 2024-11-02
    Scroll(Scroll),
}

/// A task bar declaration
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDecl {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Explicit row; the next free row when absent
    pub row: Option<u32>,
    /// Completed fraction, percentages already divided by 100
    pub progress: Option<f64>,
}

/// A dependency arrow from `source`'s end to `target`'s start
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyDecl {
    pub source: String,
    pub target: String,
}

/// A numeric `name = value` setting
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    pub name: String,
    pub value: f64,
    /// Span of the value alone
    pub value_span: SourceSpan,
}

/// Initial scroll position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scroll {
    /// Left edge of the horizontal window
    X(NaiveDate),
    /// First visible row
    Y(u32),
}
