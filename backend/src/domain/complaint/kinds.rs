//! Closed vocabularies for complaint category, priority and status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ComplaintValidationError;

/// Maintenance trade a complaint is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Plumbing,
    Electrical,
    Cleaning,
    Carpentry,
    Other,
}

impl Category {
    pub const ALL: [Self; 5] = [
        Self::Plumbing,
        Self::Electrical,
        Self::Cleaning,
        Self::Carpentry,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plumbing => "Plumbing",
            Self::Electrical => "Electrical",
            Self::Cleaning => "Cleaning",
            Self::Carpentry => "Carpentry",
            Self::Other => "Other",
        }
    }
}

/// Urgency chosen by the submitter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Triage status of a complaint.
///
/// The wire and storage form of [`ComplaintStatus::InProgress`] contains a
/// space: `"In Progress"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ComplaintStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Rejected,
}

impl ComplaintStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Resolved,
        Self::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
        }
    }
}

macro_rules! str_vocabulary {
    ($ty:ident, $variant:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ComplaintValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|candidate| candidate.as_str() == s)
                    .ok_or_else(|| ComplaintValidationError::$variant {
                        value: s.to_owned(),
                    })
            }
        }
    };
}

str_vocabulary!(Category, UnknownCategory);
str_vocabulary!(Priority, UnknownPriority);
str_vocabulary!(ComplaintStatus, UnknownStatus);
