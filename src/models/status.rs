use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded client health ping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Request body for recording a status check
#[derive(Debug, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

impl StatusCheck {
    /// Creates a status check stamped with the current time
    pub fn new(client_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_name,
            timestamp: Utc::now(),
        }
    }
}
