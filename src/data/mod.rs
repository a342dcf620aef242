/// Data layer: core types, loading, filtering, and view building.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, sites, payload bounds
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site + payload range → subset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  views    │  subset → SuccessSummary + CorrelationView
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
pub mod views;
