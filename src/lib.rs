pub mod case;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod merge;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use eligibility::{evaluate, explain, EligibilityAnswers, EligibilityOutcome, EligibilityResult, Readiness};
pub use error::{IntakeError, Result};
pub use merge::{deep_merge, reconcile};
