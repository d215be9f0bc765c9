use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An entry in the salon's service catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    /// Free-form price text as entered by the operator (e.g. "1500").
    pub price: String,
    pub duration_minutes: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub price: String,
    pub duration_minutes: i64,
}

impl CreateServiceRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Service name cannot be empty".to_string());
        }
        if self.duration_minutes <= 0 {
            return Err(format!(
                "Service duration must be a positive number of minutes, got {}",
                self.duration_minutes
            ));
        }
        Ok(())
    }
}
