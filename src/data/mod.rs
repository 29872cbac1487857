/// Data layer: core types, loading, and column classification.
///
/// Architecture:
/// ```text
///      .csv bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse stream → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Column>, unique names, uniform row count
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  numeric / categorical partition
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod schema;
