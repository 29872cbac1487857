/// Chart layer: request validation, data preparation and figure building.
///
/// ```text
///   ChartRequest ──► prepare ──► PreparedSeries ──► render ──► Figure
///                      │                              │
///                ValidationError                 RenderError
/// ```
pub mod prepare;
pub mod render;

use std::fmt;

use thiserror::Error;

use crate::data::model::Table;
use prepare::ValidationError;
use render::{Figure, RenderError};

/// The three supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "Bar"),
            ChartKind::Line => write!(f, "Line"),
            ChartKind::Pie => write!(f, "Pie"),
        }
    }
}

/// A chart kind together with the column chosen for each of its roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartRequest {
    /// `category` labels the bars (any kind); `value` must be numeric.
    Bar { category: String, value: String },
    /// Both axes must be numeric.
    Line { x: String, y: String },
    /// `category` is the grouping key (any kind); `value` must be numeric.
    Pie { category: String, value: String },
}

impl ChartRequest {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartRequest::Bar { .. } => ChartKind::Bar,
            ChartRequest::Line { .. } => ChartKind::Line,
            ChartRequest::Pie { .. } => ChartKind::Pie,
        }
    }
}

impl fmt::Display for ChartRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartRequest::Bar { category, value } | ChartRequest::Pie { category, value } => {
                write!(f, "{} chart of '{value}' by '{category}'", self.kind())
            }
            ChartRequest::Line { x, y } => write!(f, "Line chart of '{y}' by '{x}'"),
        }
    }
}

/// Anything that stops a chart request from producing a figure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Run one chart action end to end: validate and prepare, then build the figure.
pub fn generate_chart(table: Option<&Table>, request: &ChartRequest) -> Result<Figure, ChartError> {
    let series = prepare::prepare(table, request)?;
    let figure = render::render(&series)?;
    Ok(figure)
}
