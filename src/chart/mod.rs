//! The chart model: tasks, dependencies, routing settings and the viewport.
//!
//! A [`Chart`] validates every mutation, so the bar snapshot handed to the
//! router always has unique names and unique rows, and every connector points
//! at existing tasks.

pub mod interact;
pub mod task;
pub mod viewport;

use chrono::NaiveDate;
use glam::DVec2;

use crate::ast::{Program, Scroll, StatementKind};
use crate::errors::{BuildError, ChartError, ConfigError, SourceContext};
use crate::route::{Bar, Connector, Route, RouteConfig};

pub use interact::{BarState, ConnectorState, MouseButton, PointerAction};
pub use task::{Task, date_to_x};
pub use viewport::Viewport;

/// How close the pointer must be to a connector to hover it, in rows.
const HOVER_TOLERANCE: f64 = 0.1;

/// A routed connector together with its hover state.
#[derive(Debug, Clone)]
pub struct RoutedConnector<'a> {
    pub connector: &'a Connector,
    pub state: ConnectorState,
    pub route: Route,
}

#[derive(Debug, Clone, Default)]
pub struct Chart {
    tasks: Vec<Task>,
    connectors: Vec<(Connector, ConnectorState)>,
    config: RouteConfig,
    viewport: Viewport,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RouteConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Build a chart from parsed source, applying statements in order.
    ///
    /// The view is fitted to the tasks, then moved to the last `scroll`
    /// positions given.
    pub fn from_program(program: &Program, ctx: &SourceContext) -> Result<Self, BuildError> {
        let mut chart = Chart::new();
        let mut scroll_x = None;
        let mut scroll_y = None;

        for stmt in &program.statements {
            let span = stmt.span;
            match &stmt.kind {
                StatementKind::Task(decl) => {
                    let row = decl.row.unwrap_or_else(|| chart.next_row());
                    Task::new(decl.name.clone(), decl.start, decl.end, row)
                        .and_then(|t| t.with_progress(decl.progress.unwrap_or(0.0)))
                        .and_then(|t| chart.add_task(t))
                        .map_err(|e| BuildError::chart(e, ctx, span))?;
                }
                StatementKind::Dependency(dep) => chart
                    .add_dependency(&dep.source, &dep.target)
                    .map_err(|e| BuildError::chart(e, ctx, span))?,
                StatementKind::Setting(setting) => {
                    chart
                        .apply_setting(&setting.name, setting.value)
                        .map_err(|e| {
                            let at = match e {
                                ConfigError::UnknownSetting { .. } => span,
                                _ => setting.value_span,
                            };
                            BuildError::config(e, ctx, at)
                        })?;
                }
                StatementKind::Scroll(Scroll::X(date)) => scroll_x = Some(*date),
                StatementKind::Scroll(Scroll::Y(row)) => scroll_y = Some(*row),
            }
        }

        chart.fit_view();
        if let Some(date) = scroll_x {
            chart.scroll_to_date(date);
        }
        if let Some(row) = scroll_y {
            chart.scroll_to_row(row);
        }
        crate::log::debug!(
            tasks = chart.tasks.len(),
            dependencies = chart.connectors.len(),
            "chart built"
        );
        Ok(chart)
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Replace the routing settings. Connectors are attached again since the
    /// corridor gap depends on the bar height.
    pub fn set_config(&mut self, config: RouteConfig) {
        self.config = config;
        let bars = self.bars();
        for (connector, _) in &mut self.connectors {
            connector.attach(&bars, &self.config);
        }
    }

    /// Apply a `name = value` setting from chart source.
    pub fn apply_setting(&mut self, name: &str, value: f64) -> Result<(), ConfigError> {
        let config = self.config;
        let config = match name {
            "clearance" => config.with_clearance(value)?,
            "radius" => config.with_corner_radius(value)?,
            "curve" => config.with_curve_factor(value)?,
            "bar_height" => config.with_bar_half_height(value * 0.5)?,
            "corridor" => config.with_fallback_corridor(value)?,
            "arrow" => config.with_arrow_scale(value)?,
            "window" => return self.viewport.set_window(value),
            _ => {
                return Err(ConfigError::UnknownSetting {
                    name: name.to_string(),
                });
            }
        };
        self.set_config(config);
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name() == name)
    }

    pub fn connectors(&self) -> impl Iterator<Item = &Connector> + '_ {
        self.connectors.iter().map(|(c, _)| c)
    }

    /// Row a task gets when none is given: one past the highest used.
    pub fn next_row(&self) -> u32 {
        viewport::row_count(&self.tasks)
    }

    pub fn add_task(&mut self, task: Task) -> Result<(), ChartError> {
        if self.task(task.name()).is_some() {
            return Err(ChartError::DuplicateTask {
                name: task.name().to_string(),
            });
        }
        if let Some(owner) = self.tasks.iter().find(|t| t.row() == task.row()) {
            return Err(ChartError::RowTaken {
                row: task.row(),
                owner: owner.name().to_string(),
            });
        }
        crate::log::trace!(name = task.name(), row = task.row(), "task added");
        self.tasks.push(task);
        Ok(())
    }

    /// Remove a task along with every dependency that touches it.
    pub fn remove_task(&mut self, name: &str) -> Result<Task, ChartError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.name() == name)
            .ok_or_else(|| ChartError::UnknownTask {
                name: name.to_string(),
            })?;
        self.connectors.retain(|(c, _)| !c.touches(name));
        Ok(self.tasks.remove(idx))
    }

    /// Connect the end of `source` to the start of `target`.
    ///
    /// The corridor gap is measured against the tasks present now.
    pub fn add_dependency(&mut self, source: &str, target: &str) -> Result<(), ChartError> {
        for name in [source, target] {
            if self.task(name).is_none() {
                return Err(ChartError::UnknownTask {
                    name: name.to_string(),
                });
            }
        }
        if source == target {
            return Err(ChartError::SelfDependency {
                name: source.to_string(),
            });
        }
        if self.connectors().any(|c| c.joins(source, target)) {
            return Err(ChartError::DuplicateDependency {
                source_task: source.to_string(),
                target: target.to_string(),
            });
        }

        let mut connector = Connector::new(source, target);
        connector.attach(&self.bars(), &self.config);
        self.connectors.push((connector, ConnectorState::default()));
        Ok(())
    }

    pub fn remove_dependency(&mut self, source: &str, target: &str) -> Result<(), ChartError> {
        let idx = self
            .connectors()
            .position(|c| c.joins(source, target))
            .ok_or_else(|| ChartError::UnknownDependency {
                source_task: source.to_string(),
                target: target.to_string(),
            })?;
        self.connectors.remove(idx);
        Ok(())
    }

    /// Snapshot of every bar, in insertion order.
    pub fn bars(&self) -> Vec<Bar> {
        self.tasks.iter().map(Task::to_bar).collect()
    }

    /// Route every dependency against the current snapshot.
    pub fn routes(&self) -> Vec<RoutedConnector<'_>> {
        let bars = self.bars();
        self.connectors
            .iter()
            .filter_map(|(connector, state)| {
                let route = connector.route(&bars, &self.config)?;
                Some(RoutedConnector {
                    connector,
                    state: *state,
                    route,
                })
            })
            .collect()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Fit the view to all tasks.
    pub fn fit_view(&mut self) {
        self.viewport.fit(&self.tasks);
    }

    /// Start the horizontal window at `date`.
    pub fn scroll_to_date(&mut self, date: NaiveDate) {
        self.viewport.scroll_x(&self.tasks, date_to_x(date));
    }

    /// Make `row` the lowest visible row.
    pub fn scroll_to_row(&mut self, row: u32) {
        self.viewport.scroll_y(&self.tasks, row);
    }

    /// Feed a pointer event at chart position `p` to every bar and connector.
    pub fn pointer(&mut self, p: DVec2, action: PointerAction) {
        let half = self.config.bar_half_height();
        for task in &mut self.tasks {
            let inside = task.to_bar().bounds(half).contains_strict(p);
            task.state = task.state.on_pointer(action, inside);
        }

        if action == PointerAction::Move {
            let bars = self.bars();
            let config = self.config;
            for (connector, state) in &mut self.connectors {
                let inside = connector
                    .route(&bars, &config)
                    .is_some_and(|r| interact::near_path(&r.path, p, HOVER_TOLERANCE));
                state.on_move(inside);
            }
        }
    }
}
