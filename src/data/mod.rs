/// Data layer: core types, loading, filtering, and chart aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site/payload summaries
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  filter   │ ──▶ │  chart    │  (site, payload range) → Pie/ScatterSpec
///   └──────────┘      └──────────┘
/// ```

pub mod chart;
pub mod filter;
pub mod loader;
pub mod model;
