//! User domain - internal identities for external actors

mod entity;
mod repository;
mod validation;

pub use entity::{ExternalId, User, UserId};
pub use repository::UserRepository;
pub use validation::{validate_external_id, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
