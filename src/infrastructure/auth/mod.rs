//! Authorization infrastructure

mod guard;

pub use guard::AuthGuard;
