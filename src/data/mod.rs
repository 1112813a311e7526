/// Data layer: log parsing, the dataset model and derived metrics.
///
/// Architecture:
/// ```text
///  benchmark_4.txt / benchmark_4_broad_effect.txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read whole file
///   └──────────┘
///        │ lines
///        ▼
///   ┌──────────┐     ┌────────┐
///   │  fields   │────▶│ units  │  classify line, normalise time token
///   └──────────┘     └────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ builder   │  group slots, first-occurrence dedup → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  ratio    │  survival ratio = pairs_to_narrow / pairs
///   └──────────┘
/// ```

pub mod builder;
pub mod fields;
pub mod loader;
pub mod model;
pub mod ratio;
pub mod units;
