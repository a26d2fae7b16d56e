//! Trip domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A booking linking one user to one launch.
///
/// At most one trip exists per (user_id, launch_id) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub user_id: Uuid,
    /// External launch catalog reference; legacy rows may lack one
    pub launch_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// Create a new trip for a user and launch
    pub fn new(id: Uuid, user_id: Uuid, launch_id: i32) -> Self {
        Self {
            id,
            user_id,
            launch_id: Some(launch_id),
            created_at: Utc::now(),
        }
    }

    /// Check whether this trip books the given launch
    pub fn is_for_launch(&self, launch_id: i32) -> bool {
        self.launch_id == Some(launch_id)
    }
}
