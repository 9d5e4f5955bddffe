//! Complaint records and their status lifecycle.
//!
//! A complaint is filed by an account, triaged by admins through status
//! updates, and finally confirmed by its owner once resolved. The owner
//! reference is fixed at submission and never rewritten.

use std::fmt;

mod kinds;
mod lifecycle;
mod record;

pub use kinds::{Category, ComplaintStatus, Priority};
pub use lifecycle::{ConfirmOutcome, LifecycleError, StatusTransitionPolicy};
pub use record::{Complaint, ComplaintFilter, ComplaintId, ComplaintRecord, ComplaintSubmission};

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 200;
/// Maximum description length in characters.
pub const DESCRIPTION_MAX: usize = 5000;
/// Maximum image reference length in bytes.
pub const IMAGE_URL_MAX: usize = 2048;

/// Validation errors raised while parsing complaint input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplaintValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    EmptyDescription,
    DescriptionTooLong { max: usize },
    ImageUrlTooLong { max: usize },
    UnknownCategory { value: String },
    UnknownPriority { value: String },
    UnknownStatus { value: String },
}

impl ComplaintValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::EmptyDescription | Self::DescriptionTooLong { .. } => "description",
            Self::ImageUrlTooLong { .. } => "imageUrl",
            Self::UnknownCategory { .. } => "category",
            Self::UnknownPriority { .. } => "priority",
            Self::UnknownStatus { .. } => "status",
        }
    }

    /// Offending raw value for enum membership failures.
    pub fn rejected_value(&self) -> Option<&str> {
        match self {
            Self::UnknownCategory { value }
            | Self::UnknownPriority { value }
            | Self::UnknownStatus { value } => Some(value.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for ComplaintValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
            Self::ImageUrlTooLong { max } => {
                write!(f, "imageUrl must be at most {max} bytes")
            }
            Self::UnknownCategory { .. } => write!(
                f,
                "category must be one of Plumbing, Electrical, Cleaning, Carpentry, Other"
            ),
            Self::UnknownPriority { .. } => {
                write!(f, "priority must be one of Low, Medium, High")
            }
            Self::UnknownStatus { .. } => write!(
                f,
                "status must be one of Pending, In Progress, Resolved, Rejected"
            ),
        }
    }
}

impl std::error::Error for ComplaintValidationError {}
