/// Data layer: table loading, core types, and vector extraction.
///
/// Architecture:
/// ```text
///        .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (header + raw rows)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ extract   │  drop sentinel row, parse features → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Entity> (label + feature vector)
///   └──────────┘
/// ```

pub mod extract;
pub mod loader;
pub mod model;
