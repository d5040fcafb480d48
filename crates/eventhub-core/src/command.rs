//! Command abstractions.

use uuid::Uuid;

use crate::id::UserId;

/// A write request issued on behalf of an authenticated user.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable name used as a tracing field.
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;

    /// The user the command acts for. Eligibility is always evaluated
    /// against this user, never against ids found in the payload.
    fn issued_by(&self) -> UserId;
}
