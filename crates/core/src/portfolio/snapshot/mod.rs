//! Day-granularity snapshots of portfolio value and the trend view over them.

mod snapshot_model;
mod snapshot_service;
mod snapshot_traits;


pub use snapshot_model::{HistorySummary, PortfolioHistory, PortfolioSnapshot, ValuePoint};
pub use snapshot_service::SnapshotService;
pub use snapshot_traits::{SnapshotRepositoryTrait, SnapshotServiceTrait};
