/// Data layer: core types, loading, filtering, metrics and export.
///
/// Architecture:
/// ```text
///  academic_curriculum.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse once → Arc<Dataset> (cached)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → FilteredView (indices)
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │ summary   │   │  export   │  FilteredView → CSV bytes
///   └──────────┘   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
