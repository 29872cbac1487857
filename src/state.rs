use std::path::Path;

use crate::chart::render::Figure;
use crate::chart::{generate_chart, ChartError, ChartKind, ChartRequest};
use crate::data::loader::{load_file, LoadError};
use crate::data::model::Table;
use crate::data::schema::{classify, Schema};

// ---------------------------------------------------------------------------
// Chart selections
// ---------------------------------------------------------------------------

/// The two column choices of one chart section, in role order
/// (category/x first, value/y second).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSelection {
    pub first: Option<String>,
    pub second: Option<String>,
}

/// Column choices for each chart section of the side panel.
#[derive(Debug, Clone, Default)]
pub struct ChartSelections {
    pub bar: RoleSelection,
    pub line: RoleSelection,
    pub pie: RoleSelection,
}

impl ChartSelections {
    /// Default every role to the first legal column.
    fn defaults_for(schema: &Schema) -> Self {
        let first_numeric = schema.numeric.first().cloned();
        let first_categorical = schema.categorical.first().cloned();
        ChartSelections {
            bar: RoleSelection {
                first: first_categorical.clone(),
                second: first_numeric.clone(),
            },
            line: RoleSelection {
                first: first_numeric.clone(),
                second: first_numeric.clone(),
            },
            pie: RoleSelection {
                first: first_categorical,
                second: first_numeric,
            },
        }
    }

    pub fn get(&self, kind: ChartKind) -> &RoleSelection {
        match kind {
            ChartKind::Bar => &self.bar,
            ChartKind::Line => &self.line,
            ChartKind::Pie => &self.pie,
        }
    }

    pub fn get_mut(&mut self, kind: ChartKind) -> &mut RoleSelection {
        match kind {
            ChartKind::Bar => &mut self.bar,
            ChartKind::Line => &mut self.line,
            ChartKind::Pie => &mut self.pie,
        }
    }

    /// Build the request for a chart section, if both roles are filled.
    pub fn request(&self, kind: ChartKind) -> Option<ChartRequest> {
        let sel = self.get(kind);
        let first = sel.first.clone()?;
        let second = sel.second.clone()?;
        Some(match kind {
            ChartKind::Bar => ChartRequest::Bar {
                category: first,
                value: second,
            },
            ChartKind::Line => ChartRequest::Line {
                x: first,
                y: second,
            },
            ChartKind::Pie => ChartRequest::Pie {
                category: first,
                value: second,
            },
        })
    }
}

/// Result of the latest chart action.
#[derive(Debug, Clone)]
pub struct ChartOutput {
    pub request: ChartRequest,
    pub result: Result<Figure, ChartError>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded table (None until the user loads a file).
    pub table: Option<Table>,

    /// File name of the loaded table.
    pub source_name: Option<String>,

    /// Numeric / categorical split of `table`.
    pub schema: Schema,

    /// Column choices per chart section.
    pub selections: ChartSelections,

    /// Latest chart action and its outcome.
    pub output: Option<ChartOutput>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded table, reclassify and reset chart selections.
    pub fn set_table(&mut self, table: Table, source_name: Option<String>) {
        self.schema = classify(Some(&table));
        self.selections = ChartSelections::defaults_for(&self.schema);
        self.table = Some(table);
        self.source_name = source_name;
        self.output = None;
        self.status_message = None;
    }

    /// Record a failed load. Any previously loaded table stays active.
    pub fn load_failed(&mut self, err: &LoadError) {
        self.status_message = Some(format!("An error occurred while reading the file: {err}"));
    }

    /// Load a CSV file from disk into the state.
    pub fn open_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?} from {}",
                    table.len(),
                    table.column_names().collect::<Vec<_>>(),
                    path.display()
                );
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned());
                self.set_table(table, name);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.load_failed(&e);
            }
        }
    }

    /// Run the chart action for one side-panel section.
    pub fn generate(&mut self, kind: ChartKind) {
        let Some(request) = self.selections.request(kind) else {
            self.status_message = Some(format!("Select columns for the {kind} chart first."));
            return;
        };

        self.status_message = None;
        let result = generate_chart(self.table.as_ref(), &request);
        match &result {
            Ok(_) => log::info!("Generated {request}"),
            Err(e) => log::warn!("Could not generate {request}: {e}"),
        }
        self.output = Some(ChartOutput { request, result });
    }
}
