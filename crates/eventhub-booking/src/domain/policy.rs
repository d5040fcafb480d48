//! Configurable booking policy.
//!
//! Two rules have had more than one accepted answer over the life of the
//! service. Both are explicit settings here rather than hard-coded.

use std::fmt;
use std::str::FromStr;

use eventhub_core::error::{Denial, DomainError, Entity};
use thiserror::Error;

/// How a missing enrollment is reported on create/change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingEnrollmentPolicy {
    /// The enrollment does not exist: report `NotFound`.
    #[default]
    NotFound,
    /// Treat it as a permission failure: report `Forbidden`.
    Forbidden,
}

impl MissingEnrollmentPolicy {
    /// The error reported when the caller has no enrollment.
    #[must_use]
    pub fn error(self) -> DomainError {
        match self {
            Self::NotFound => DomainError::NotFound(Entity::Enrollment),
            Self::Forbidden => DomainError::Forbidden(Denial::MissingEnrollment),
        }
    }
}

/// What reading the current booking requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookingVisibility {
    /// Only the booking itself has to exist.
    #[default]
    ExistenceOnly,
    /// The caller also needs an enrollment and a ticket whose type includes
    /// a hotel stay; anything missing reads as `NotFound`.
    RequireHotelTicket,
}

/// Policy settings consulted by the booking handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingPolicy {
    /// Error kind for a caller without an enrollment.
    pub missing_enrollment: MissingEnrollmentPolicy,
    /// Preconditions for reading a booking.
    pub visibility: BookingVisibility,
}

/// A policy setting could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised {setting} value {value:?} (expected one of: {expected})")]
pub struct PolicyParseError {
    /// Name of the setting.
    pub setting: &'static str,
    /// The rejected input.
    pub value: String,
    /// Accepted spellings.
    pub expected: &'static str,
}

impl FromStr for MissingEnrollmentPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "not_found" => Ok(Self::NotFound),
            "forbidden" => Ok(Self::Forbidden),
            _ => Err(PolicyParseError {
                setting: "missing enrollment policy",
                value: s.to_owned(),
                expected: "not_found, forbidden",
            }),
        }
    }
}

impl fmt::Display for MissingEnrollmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
        })
    }
}

impl FromStr for BookingVisibility {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "existence_only" => Ok(Self::ExistenceOnly),
            "require_hotel_ticket" => Ok(Self::RequireHotelTicket),
            _ => Err(PolicyParseError {
                setting: "booking visibility",
                value: s.to_owned(),
                expected: "existence_only, require_hotel_ticket",
            }),
        }
    }
}

impl fmt::Display for BookingVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ExistenceOnly => "existence_only",
            Self::RequireHotelTicket => "require_hotel_ticket",
        })
    }
}
