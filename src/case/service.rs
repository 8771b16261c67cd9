use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::{
    eligibility::{evaluate, EligibilityAnswers, EligibilityOutcome},
    error::{IntakeError, Result},
    merge::reconcile,
    storage::{CaseRecord, Database, DatabaseStats, ScreeningRecord},
};

/// Case updates and eligibility screenings on top of the store
pub struct IntakeService {
    db: Database,
    defaults: Value,
}

impl IntakeService {
    pub fn new(db: Database, defaults: Value) -> Self {
        Self { db, defaults }
    }

    pub fn defaults(&self) -> &Value {
        &self.defaults
    }

    /// Open a new case filled with the defaults
    pub fn create_case(&self, id: &str) -> Result<CaseRecord> {
        if self.db.get_case(id)?.is_some() {
            return Err(IntakeError::CaseExists(id.to_string()));
        }

        let case = CaseRecord::new(id, self.defaults.clone());
        self.db.save_case(&case)?;
        info!("Created case {}", id);
        Ok(case)
    }

    pub fn get_case(&self, id: &str) -> Result<CaseRecord> {
        self.db
            .get_case(id)?
            .ok_or_else(|| IntakeError::CaseNotFound(id.to_string()))
    }

    pub fn list_cases(&self) -> Result<Vec<CaseRecord>> {
        self.db.list_cases()
    }

    pub fn delete_case(&self, id: &str) -> Result<()> {
        if !self.db.delete_case(id)? {
            return Err(IntakeError::CaseNotFound(id.to_string()));
        }
        info!("Deleted case {}", id);
        Ok(())
    }

    /// Merge a client patch into a case, creating the case if needed.
    ///
    /// The stored data is rebuilt as `defaults <- stored <- patch`. A root
    /// patch must be an object or `null`.
    pub fn patch_case(&self, id: &str, patch: &Value) -> Result<CaseRecord> {
        let case = self.patched_case(id, patch)?;
        self.db.save_case(&case)?;
        info!("Patched case {}", id);
        Ok(case)
    }

    fn patched_case(&self, id: &str, patch: &Value) -> Result<CaseRecord> {
        if !(patch.is_object() || patch.is_null()) {
            return Err(IntakeError::InvalidPatch(format!(
                "case patch must be a JSON object, got {}",
                describe(patch)
            )));
        }

        let existing = self.db.get_case(id)?;
        let null = Value::Null;
        let stored = existing.as_ref().map_or(&null, |case| &case.data);
        let data = reconcile(&self.defaults, stored, patch);

        Ok(match existing {
            Some(mut case) => {
                case.data = data;
                case.updated_at = Utc::now();
                case
            }
            None => {
                debug!("Case {} not found, creating it from the patch", id);
                CaseRecord::new(id, data)
            }
        })
    }

    /// Evaluate answers and log the screening. With a case id, the outcome
    /// is also written to the case's `eligibility` field in the same
    /// transaction as the screening row.
    pub fn screen(&self, case_id: Option<&str>, answers: &EligibilityAnswers) -> Result<EligibilityOutcome> {
        let outcome = evaluate(answers);

        let screening_id = match case_id {
            Some(id) => {
                self.get_case(id)?;
                let patch = json!({
                    "eligibility": {
                        "answers": answers,
                        "result": outcome.result,
                        "readiness": outcome.readiness,
                    }
                });
                let case = self.patched_case(id, &patch)?;
                self.db.record_screening(&case, answers, &outcome)?
            }
            None => self.db.save_screening(None, answers, &outcome)?,
        };

        info!(
            "Screening {} recorded: {} / {}",
            screening_id, outcome.result, outcome.readiness
        );
        Ok(outcome)
    }

    pub fn screening_history(&self, limit: Option<usize>) -> Result<Vec<ScreeningRecord>> {
        self.db.get_screening_history(limit)
    }

    pub fn stats(&self) -> Result<DatabaseStats> {
        self.db.get_stats()
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::defaults::builtin_case_defaults;
    use crate::eligibility::{Answer, ApplicantType, EligibilityResult, Readiness};

    fn service() -> IntakeService {
        IntakeService::new(Database::in_memory().unwrap(), builtin_case_defaults())
    }

    #[test]
    fn test_create_case_uses_defaults() {
        let service = service();
        let case = service.create_case("IN-001").unwrap();

        assert_eq!(case.data, builtin_case_defaults());
        assert!(matches!(service.create_case("IN-001"), Err(IntakeError::CaseExists(_))));
    }

    #[test]
    fn test_patch_layers_over_stored_and_defaults() {
        let service = service();
        service
            .patch_case("IN-002", &json!({"applicant": {"firstName": "Ana", "phone": "555-0100"}}))
            .unwrap();
        let case = service
            .patch_case("IN-002", &json!({"applicant": {"phone": "555-0199"}, "documents": ["report.pdf"]}))
            .unwrap();

        assert_eq!(case.data["applicant"]["firstName"], "Ana");
        assert_eq!(case.data["applicant"]["phone"], "555-0199");
        assert_eq!(case.data["applicant"]["address"]["state"], "IN");
        assert_eq!(case.data["documents"], json!(["report.pdf"]));
        assert_eq!(case.data["status"], "draft");
    }

    #[test]
    fn test_patch_keeps_created_at() {
        let service = service();
        let created = service.create_case("IN-003").unwrap();
        let patched = service.patch_case("IN-003", &json!({"status": "submitted"})).unwrap();

        assert_eq!(patched.created_at, created.created_at);
        assert!(patched.updated_at >= created.updated_at);
        assert_eq!(service.get_case("IN-003").unwrap().status(), "submitted");
    }

    #[test]
    fn test_null_patch_is_a_no_op() {
        let service = service();
        service.patch_case("IN-004", &json!({"crime": {"county": "Lake"}})).unwrap();
        let case = service.patch_case("IN-004", &Value::Null).unwrap();
        assert_eq!(case.data["crime"]["county"], "Lake");
    }

    #[test]
    fn test_non_object_patch_is_rejected() {
        let service = service();
        for patch in [json!([1]), json!("text"), json!(3), json!(true)] {
            assert!(matches!(
                service.patch_case("IN-005", &patch),
                Err(IntakeError::InvalidPatch(_))
            ));
        }
        assert!(matches!(service.get_case("IN-005"), Err(IntakeError::CaseNotFound(_))));
    }

    #[test]
    fn test_screen_records_outcome_on_case() {
        let service = service();
        service.create_case("IN-006").unwrap();

        let answers = EligibilityAnswers {
            applicant_type: Some(ApplicantType::Victim),
            crime_in_indiana: Some(Answer::NotSure),
            ..EligibilityAnswers::default()
        };
        let outcome = service.screen(Some("IN-006"), &answers).unwrap();
        assert_eq!(outcome.result, EligibilityResult::Eligible);
        assert_eq!(outcome.readiness, Readiness::MissingInfo);

        let case = service.get_case("IN-006").unwrap();
        assert_eq!(case.data["eligibility"]["result"], "eligible");
        assert_eq!(case.data["eligibility"]["readiness"], "missing_info");
        assert_eq!(case.data["eligibility"]["answers"]["crimeInIndiana"], "not_sure");

        let history = service.screening_history(None).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].case_id.as_deref(), Some("IN-006"));
    }

    #[test]
    fn test_screen_unknown_case_fails() {
        let service = service();
        let result = service.screen(Some("nope"), &EligibilityAnswers::default());
        assert!(matches!(result, Err(IntakeError::CaseNotFound(_))));
        assert_eq!(service.stats().unwrap().total_screenings, 0);
    }

    #[test]
    fn test_screen_keeps_case_fields_and_refreshes_updated_at() {
        let service = service();
        let created = service.create_case("IN-007").unwrap();
        service.patch_case("IN-007", &json!({"crime": {"county": "Allen"}})).unwrap();

        let answers = EligibilityAnswers {
            applicant_type: Some(ApplicantType::NotCovered),
            ..EligibilityAnswers::default()
        };
        service.screen(Some("IN-007"), &answers).unwrap();

        let case = service.get_case("IN-007").unwrap();
        assert_eq!(case.data["crime"]["county"], "Allen");
        assert_eq!(case.data["eligibility"]["result"], "not_eligible");
        assert_eq!(case.created_at, created.created_at);
        assert!(case.updated_at >= created.updated_at);
        assert_eq!(service.screening_history(None).unwrap().len(), 1);
    }

    #[test]
    fn test_screen_without_case() {
        let service = service();
        let outcome = service.screen(None, &EligibilityAnswers::default()).unwrap();
        assert_eq!(outcome.result, EligibilityResult::NeedsReview);
        assert_eq!(service.stats().unwrap().needs_review, 1);
    }
}
