//! Authorization domain - guard outcomes

mod error;
mod result;

pub use error::{AuthorizationError, ForbiddenReason};
pub use result::AuthorizationResult;
