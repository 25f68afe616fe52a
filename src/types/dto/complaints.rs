use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::complaint::{Category, ComplaintStatus};

/// Request model for filing a new complaint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateComplaintRequest {
    /// Short title of the issue
    pub title: String,

    /// Free-text description of the issue
    pub description: String,

    /// Category of the issue
    pub category: Category,

    /// Latitude of the reported location
    pub latitude: f64,

    /// Longitude of the reported location
    pub longitude: f64,

    /// Optional street address of the reported location
    pub address: Option<String>,

    /// Whether the complaint should be filed anonymously
    pub is_anonymous: bool,
}

/// Request model for editing title/description
///
/// Only permitted for the owner while the complaint is still `registered`.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateComplaintRequest {
    /// New title, if changing
    pub title: Option<String>,

    /// New description, if changing
    pub description: Option<String>,
}

/// Request model for a status transition
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// Status to transition into
    pub target_status: ComplaintStatus,

    /// Responsible area; required when targeting `assigned` or `in_process`
    pub assigned_area: Option<String>,

    /// Optional comment recorded on the audit entry
    pub comment: Option<String>,
}

/// Response model for a complaint record
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ComplaintResponse {
    /// Complaint id (UUID)
    pub id: String,

    /// Short title of the issue
    pub title: String,

    /// Free-text description of the issue
    pub description: String,

    /// Category of the issue
    pub category: Category,

    /// Current lifecycle status
    pub status: ComplaintStatus,

    /// Responsible area, present while status is assigned/in_process
    pub assigned_area: Option<String>,

    /// Latitude of the reported location
    pub latitude: f64,

    /// Longitude of the reported location
    pub longitude: f64,

    /// Optional street address of the reported location
    pub address: Option<String>,

    /// Whether the complaint was filed anonymously
    pub is_anonymous: bool,

    /// Owner user id; withheld for anonymous complaints unless the viewer
    /// is the owner
    pub owner_id: Option<String>,

    /// Creation time (Unix timestamp)
    pub created_at: i64,
}

/// Response model for a complaint listing
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ComplaintListResponse {
    /// Matching complaints
    pub complaints: Vec<ComplaintResponse>,
}

/// One row of the rendered complaint timeline
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TimelineRowResponse {
    /// Status entered at this point in the history
    pub status: ComplaintStatus,

    /// Human-friendly relative time label ("moments ago", "3 hours ago", ...)
    pub relative_label: String,

    /// Comment recorded with the transition, if any
    pub comment: Option<String>,

    /// Display label for who performed the transition
    pub actor_label: String,
}

/// Response model for the complaint timeline endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TimelineResponse {
    /// Timeline rows, oldest first
    pub rows: Vec<TimelineRowResponse>,
}

/// Response model for the configured area catalog
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AreaListResponse {
    /// Department names complaints can be assigned to
    pub areas: Vec<String>,
}
