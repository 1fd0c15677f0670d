//! Tasks: named date spans on a chart row.

use chrono::NaiveDate;

use super::interact::BarState;
use crate::errors::ChartError;
use crate::route::Bar;

/// Position of `date` on the time axis: days since 1970-01-01.
pub fn date_to_x(date: NaiveDate) -> f64 {
    // NaiveDate's default is the Unix epoch.
    date.signed_duration_since(NaiveDate::default()).num_days() as f64
}

/// Highest row a task may sit on, so a row count always fits in `u32`.
pub const MAX_ROW: u32 = u32::MAX - 1;

/// A task bar with its dates, row and completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    name: String,
    start: NaiveDate,
    end: NaiveDate,
    row: u32,
    progress: f64,
    pub state: BarState,
}

impl Task {
    /// Create a task, rejecting an end date before the start date and a
    /// row past [`MAX_ROW`].
    ///
    /// Equal dates make a zero-width milestone.
    pub fn new(
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        row: u32,
    ) -> Result<Self, ChartError> {
        let name = name.into();
        if end < start {
            return Err(ChartError::EndBeforeStart { name });
        }
        if row > MAX_ROW {
            return Err(ChartError::RowOutOfRange {
                name,
                row,
                max: MAX_ROW,
            });
        }
        Ok(Self {
            name,
            start,
            end,
            row,
            progress: 0.0,
            state: BarState::Normal,
        })
    }

    /// Set the completed fraction, which must lie in `0..=1`.
    pub fn with_progress(mut self, progress: f64) -> Result<Self, ChartError> {
        if !(0.0..=1.0).contains(&progress) {
            return Err(ChartError::ProgressOutOfRange {
                name: self.name,
                progress,
            });
        }
        self.progress = progress;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn duration_days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days()
    }

    /// The bar the router and renderer see.
    pub fn to_bar(&self) -> Bar {
        Bar::new(
            self.name.clone(),
            date_to_x(self.start),
            date_to_x(self.end),
            self.row,
        )
        .with_progress(self.progress)
    }
}
