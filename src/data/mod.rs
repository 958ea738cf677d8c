//! Data layer: core types, loading, and schema derivation.
//!
//! Architecture:
//! ```text
//!  .csv / .tsv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Table (typed cells, rectangular)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Table    │  ordered named columns, immutable per session
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Schema   │  features = all but last column, target = last,
//!   └──────────┘  numeric subset for statistics and plotting
//! ```
//!
//! Layout convention carried by every format: the **last column is the
//! prediction target**. The loader does not try to guess a target column;
//! datasets must be exported with the target in final position.

pub mod loader;
pub mod schema;
pub mod table;
