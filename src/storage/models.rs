use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::eligibility::{EligibilityAnswers, EligibilityOutcome};

/// A compensation case as held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One run of the eligibility screening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningRecord {
    pub id: i64,
    pub case_id: Option<String>,
    pub answers: EligibilityAnswers,
    pub outcome: EligibilityOutcome,
    pub timestamp: DateTime<Utc>,
}

impl CaseRecord {
    pub fn new(id: &str, data: Value) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            data,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn status(&self) -> &str {
        self.data
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
    }
}
