//! Pet domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pet owned by a user. Names are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Pet {
    pub fn new(id: Uuid, name: String, user_id: Uuid) -> Self {
        Self {
            id,
            name,
            user_id,
            created_at: Utc::now(),
        }
    }
}
