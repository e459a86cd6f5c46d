//! Request and response types

pub mod error;
pub mod json;
pub mod props;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use props::{MembershipProps, TeamPageProps, TeamProps, UserProps};
