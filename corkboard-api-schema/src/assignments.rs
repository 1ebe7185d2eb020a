use serde::{Deserialize, Serialize};

/// Body returned by `GET /assignments` when nothing has been saved yet.
pub const EMPTY_ASSIGNMENTS: &str = "{}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Saved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAssignmentsResponse {
    pub status: SaveStatus,
}

impl SaveAssignmentsResponse {
    pub fn saved() -> Self {
        Self {
            status: SaveStatus::Saved,
        }
    }
}
