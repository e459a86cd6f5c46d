//! Infrastructure layer - store implementations, the resolver and the guard

pub mod auth;
pub mod logging;
pub mod observability;
pub mod storage;
pub mod team;
pub mod user;
