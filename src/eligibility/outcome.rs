use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityResult {
    Eligible,
    NeedsReview,
    NotEligible,
}

/// How complete the collected information is, independent of the result.
///
/// Ordered by severity so a downgrade is `max(current, proposed)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    Ready,
    MissingInfo,
    NotReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub result: EligibilityResult,
    pub readiness: Readiness,
}

impl EligibilityOutcome {
    pub fn new(result: EligibilityResult, readiness: Readiness) -> Self {
        Self { result, readiness }
    }
}

impl EligibilityResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            EligibilityResult::Eligible => "eligible",
            EligibilityResult::NeedsReview => "needs_review",
            EligibilityResult::NotEligible => "not_eligible",
        }
    }
}

impl Readiness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Readiness::Ready => "ready",
            Readiness::MissingInfo => "missing_info",
            Readiness::NotReady => "not_ready",
        }
    }
}

impl fmt::Display for EligibilityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EligibilityResult {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "eligible" => Ok(EligibilityResult::Eligible),
            "needs_review" => Ok(EligibilityResult::NeedsReview),
            "not_eligible" => Ok(EligibilityResult::NotEligible),
            other => Err(format!("unknown eligibility result: {}", other)),
        }
    }
}

impl std::str::FromStr for Readiness {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ready" => Ok(Readiness::Ready),
            "missing_info" => Ok(Readiness::MissingInfo),
            "not_ready" => Ok(Readiness::NotReady),
            other => Err(format!("unknown readiness: {}", other)),
        }
    }
}
