pub mod answers;
pub mod outcome;
pub mod rules;

pub use answers::{Answer, ApplicantType, EligibilityAnswers, GuardianAnswer};
pub use outcome::{EligibilityOutcome, EligibilityResult, Readiness};
pub use rules::{evaluate, explain, EligibilityReport, RuleEffect, RuleFinding, RULES};
