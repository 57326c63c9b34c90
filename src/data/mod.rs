/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → CollisionDataset (cached per row limit)
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ CollisionDataset│  Vec<CollisionRecord>, slider bounds
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐   ┌───────────┐
///   │  filter   │   │ aggregate  │  index views → histogram, midpoint,
///   └──────────┘   └───────────┘  hex density
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
