pub mod config;
pub mod desirability;
pub mod order;

pub use config::{Accumulation, ScoringConfig};
pub use desirability::rank_score;
pub use order::{compute_task_order, PriorityBuckets, RankedTask};
