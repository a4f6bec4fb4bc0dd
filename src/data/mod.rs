/// Data layer: listing types, loading, caching, filtering and aggregation.
///
/// Architecture:
/// ```text
///   vehicles_us.csv
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  (path, signature) → Arc<VehicleTable>
///   └──────────┘
///        │ miss
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + normalize → VehicleTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year + makes → filtered VehicleTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  chart series
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
