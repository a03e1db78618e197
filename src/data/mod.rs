/// Data layer: MIC table, long-form expansion, loading, and filtering.
///
/// Architecture:
/// ```text
///  MIC_TABLE (embedded)      .json / .csv / .parquet
///        │                          │
///        │                   ┌──────────┐
///        │                   │  loader   │  parse file → Vec<Observation>
///        │                   └──────────┘
///        ▼                          │
///   ┌────────────────┐◄─────────────┘
///   │ DatasetBuilder  │  reshape, log10, resistant flag, labels
///   └────────────────┘
///        │
///        ▼
///   Vec<Measurement>  (48 rows for the embedded table)
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  antibiotic / resistant-only selection for the viewer
///   └──────────┘
/// ```

pub mod dataset;
pub mod filter;
pub mod label;
pub mod loader;
pub mod model;
