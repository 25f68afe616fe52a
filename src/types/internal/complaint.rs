use std::fmt;

use poem_openapi::Enum;
use serde::{Deserialize, Serialize};

use crate::errors::InternalError;

/// Lifecycle status of a complaint
///
/// Statuses form a forward-only order ending in the two terminal states.
/// The database stores the snake_case string form; `parse` is the single
/// way back, so an unknown stored value surfaces as a parse error instead
/// of silently misbehaving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Registered,
    Pending,
    InReview,
    Assigned,
    InProcess,
    Resolved,
    Closed,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Pending => "pending",
            Self::InReview => "in_review",
            Self::Assigned => "assigned",
            Self::InProcess => "in_process",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, InternalError> {
        match value {
            "registered" => Ok(Self::Registered),
            "pending" => Ok(Self::Pending),
            "in_review" => Ok(Self::InReview),
            "assigned" => Ok(Self::Assigned),
            "in_process" => Ok(Self::InProcess),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            other => Err(InternalError::parse(
                "ComplaintStatus",
                format!("unknown status: {}", other),
            )),
        }
    }

    /// Nothing may leave a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Statuses that only hold together with a responsible area
    pub fn requires_area(&self) -> bool {
        matches!(self, Self::Assigned | Self::InProcess)
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed category a complaint is filed under; immutable after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Roads,
    Lighting,
    Waste,
    Water,
    Safety,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roads => "roads",
            Self::Lighting => "lighting",
            Self::Waste => "waste",
            Self::Water => "water",
            Self::Safety => "safety",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Result<Self, InternalError> {
        match value {
            "roads" => Ok(Self::Roads),
            "lighting" => Ok(Self::Lighting),
            "waste" => Ok(Self::Waste),
            "water" => Ok(Self::Water),
            "safety" => Ok(Self::Safety),
            "other" => Ok(Self::Other),
            unknown => Err(InternalError::parse(
                "Category",
                format!("unknown category: {}", unknown),
            )),
        }
    }
}

/// Role an authenticated actor carries in the request context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Citizen,
    Authority,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Authority => "authority",
            Self::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Result<Self, InternalError> {
        match value {
            "citizen" => Ok(Self::Citizen),
            "authority" => Ok(Self::Authority),
            "admin" => Ok(Self::Admin),
            unknown => Err(InternalError::parse(
                "Role",
                format!("unknown role: {}", unknown),
            )),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions the role gate rules on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintAction {
    Create,
    View,
    EditDetails,
    Transition,
    ForceClose,
    ReassignOwner,
}
