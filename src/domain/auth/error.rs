//! Typed guard failures

use thiserror::Error;

use crate::domain::team::PolicyViolation;
use crate::domain::DomainError;

/// Why a request was denied a team-scoped resource
#[derive(Debug, Error)]
pub enum AuthorizationError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Team '{team_id}' not found")]
    NotFound { team_id: String },

    #[error("Access to team '{team_id}' denied: {reason}")]
    Forbidden {
        team_id: String,
        reason: ForbiddenReason,
    },

    #[error("Authorization unavailable: {0}")]
    Infrastructure(#[from] DomainError),
}

/// Machine-readable cause of a `Forbidden` outcome
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    #[error("{0}")]
    Policy(PolicyViolation),

    #[error("user account is deactivated")]
    InactiveUser,
}

impl AuthorizationError {
    pub fn not_found(team_id: impl Into<String>) -> Self {
        Self::NotFound {
            team_id: team_id.into(),
        }
    }

    pub fn forbidden(team_id: impl Into<String>, reason: ForbiddenReason) -> Self {
        Self::Forbidden {
            team_id: team_id.into(),
            reason,
        }
    }

    /// Short label used for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::NotFound { .. } => "not_found",
            Self::Forbidden { .. } => "forbidden",
            Self::Infrastructure(_) => "infrastructure",
        }
    }
}
