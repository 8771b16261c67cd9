use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Who is applying for compensation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantType {
    Victim,
    SurvivingSpouse,
    DependentChild,
    /// Applicant is none of the covered categories
    #[serde(rename = "none")]
    NotCovered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    NotSure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardianAnswer {
    Yes,
    No,
    NotSure,
    NotApplicable,
}

/// Screening answers collected from the intake form.
///
/// Every field is optional. `None` means the question has not been
/// answered; values outside the allowed set are read as `None` too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityAnswers {
    #[serde(default, deserialize_with = "lenient")]
    pub applicant_type: Option<ApplicantType>,
    #[serde(default, deserialize_with = "lenient")]
    pub crime_in_indiana: Option<Answer>,
    #[serde(default, deserialize_with = "lenient")]
    pub reported_and_cooperated: Option<Answer>,
    #[serde(default, deserialize_with = "lenient")]
    pub meets_minimum_loss: Option<Answer>,
    #[serde(default, deserialize_with = "lenient")]
    pub victim_did_not_contribute: Option<Answer>,
    #[serde(default, deserialize_with = "lenient")]
    pub filed_within_deadline: Option<Answer>,
    #[serde(default, deserialize_with = "lenient")]
    pub minor_guardian_will_sign: Option<GuardianAnswer>,
}

impl EligibilityAnswers {
    /// Read an answer set from arbitrary JSON. Never fails: anything that
    /// is not an object gives an empty answer set.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Number of questions that have a recognised answer
    pub fn answered_count(&self) -> usize {
        [
            self.applicant_type.is_some(),
            self.crime_in_indiana.is_some(),
            self.reported_and_cooperated.is_some(),
            self.meets_minimum_loss.is_some(),
            self.victim_did_not_contribute.is_some(),
            self.filed_within_deadline.is_some(),
            self.minor_guardian_will_sign.is_some(),
        ]
        .iter()
        .filter(|answered| **answered)
        .count()
    }
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_camel_case_fields() {
        let answers = EligibilityAnswers::from_value(&json!({
            "applicantType": "surviving_spouse",
            "crimeInIndiana": "yes",
            "reportedAndCooperated": "not_sure",
            "minorGuardianWillSign": "not_applicable"
        }));

        assert_eq!(answers.applicant_type, Some(ApplicantType::SurvivingSpouse));
        assert_eq!(answers.crime_in_indiana, Some(Answer::Yes));
        assert_eq!(answers.reported_and_cooperated, Some(Answer::NotSure));
        assert_eq!(answers.meets_minimum_loss, None);
        assert_eq!(answers.minor_guardian_will_sign, Some(GuardianAnswer::NotApplicable));
        assert_eq!(answers.answered_count(), 4);
    }

    #[test]
    fn test_none_applicant_type_is_not_null() {
        let answers = EligibilityAnswers::from_value(&json!({"applicantType": "none"}));
        assert_eq!(answers.applicant_type, Some(ApplicantType::NotCovered));

        let answers = EligibilityAnswers::from_value(&json!({"applicantType": null}));
        assert_eq!(answers.applicant_type, None);
    }

    #[test]
    fn test_unknown_values_read_as_unanswered() {
        let answers = EligibilityAnswers::from_value(&json!({
            "applicantType": "cousin",
            "crimeInIndiana": true,
            "meetsMinimumLoss": 100,
            "filedWithinDeadline": {"nested": "yes"},
            "minorGuardianWillSign": "maybe",
            "unrelated": "ignored"
        }));

        assert_eq!(answers, EligibilityAnswers::default());
    }

    #[test]
    fn test_non_object_input_is_empty() {
        assert_eq!(EligibilityAnswers::from_value(&json!([1, 2])), EligibilityAnswers::default());
        assert_eq!(EligibilityAnswers::from_value(&Value::Null), EligibilityAnswers::default());
        assert_eq!(EligibilityAnswers::from_value(&json!("yes")), EligibilityAnswers::default());
    }

    #[test]
    fn test_not_applicable_only_valid_for_guardian() {
        let answers = EligibilityAnswers::from_value(&json!({"crimeInIndiana": "not_applicable"}));
        assert_eq!(answers.crime_in_indiana, None);
    }
}
