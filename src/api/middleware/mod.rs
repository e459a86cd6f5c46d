//! API middleware and extractors

pub mod actor;
pub mod metrics;

pub use actor::{extract_actor, Actor};
pub use metrics::metrics_middleware;
