//! # Scorecard Core
//!
//! Perspectives, their KPIs and the dependency relation between them.
//!
//! ## Architecture
//!
//! ```text
//! Registry
//!     │
//!     ├──> NameIndex (arena BST)
//!     │      ├─ Structure: byte-wise (case-sensitive) order
//!     │      ├─ Lookup: ASCII case-insensitive, exhaustive
//!     │      └─ Owns every Perspective and its KPIs
//!     │
//!     ├──> DependencyGraph (petgraph)
//!     │      ├─ Nodes: name table, append-only, index == position
//!     │      └─ Edges: "low performance in A may affect B"
//!     │
//!     └──> ScoreEngine
//!            ├─ Per-KPI performance, per-perspective averages
//!            ├─ Overall average, lowest performer
//!            └─ One-hop dependency impact
//! ```
//!
//! "No data" is modelled as `None`, never as `0.0`.

mod dependency;
mod error;
mod index;
mod limits;
mod registry;
mod score;
mod seed;
mod shared;
mod types;

pub use dependency::{DependencyGraph, EdgeOutcome};
pub use error::{Result, ScorecardError};
pub use index::{InorderIter, NameIndex};
pub use limits::{truncate_name, Limits, MAX_NAME_LEN, MAX_PERSPECTIVES};
pub use registry::{DependencyListing, PerspectiveOutcome, Registry, Teardown};
pub use score::{
    evaluate, kpi_performance, perspective_average, scorecard, Band, DependencyImpact,
    Evaluation, KpiReport, LowestPerformer, PerspectiveReport, PerspectiveScore, IMPACT_THRESHOLD,
};
pub use seed::{Seed, SeedDependency, SeedKpi, SeedLimits, BUILTIN_DEFAULT};
pub use shared::SharedRegistry;
pub use types::{Kpi, Perspective};
