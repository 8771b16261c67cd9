use crate::eligibility::{
    answers::{Answer, ApplicantType, EligibilityAnswers, GuardianAnswer},
    outcome::{EligibilityOutcome, EligibilityResult, Readiness},
};
use serde::Serialize;
use tracing::debug;

/// What a single rule does to the running evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", content = "value", rename_all = "snake_case")]
pub enum RuleEffect {
    Pass,
    /// Raise readiness to at least this severity
    Downgrade(Readiness),
    /// Stop evaluating; readiness is reported as `ready`
    Terminal(EligibilityResult),
}

/// One step of the screening, checked in order
pub struct Rule {
    pub name: &'static str,
    pub check: fn(&EligibilityAnswers) -> RuleEffect,
    pub reason: fn(RuleEffect) -> &'static str,
}

/// A rule that did something other than pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleFinding {
    pub rule: &'static str,
    pub effect: RuleEffect,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityReport {
    pub outcome: EligibilityOutcome,
    pub findings: Vec<RuleFinding>,
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "applicant_not_covered",
        check: applicant_not_covered,
        reason: applicant_not_covered_reason,
    },
    Rule {
        name: "applicant_unanswered",
        check: applicant_unanswered,
        reason: applicant_unanswered_reason,
    },
    Rule {
        name: "crime_in_indiana",
        check: crime_in_indiana,
        reason: crime_in_indiana_reason,
    },
    Rule {
        name: "reported_and_cooperated",
        check: reported_and_cooperated,
        reason: reported_and_cooperated_reason,
    },
    Rule {
        name: "meets_minimum_loss",
        check: meets_minimum_loss,
        reason: meets_minimum_loss_reason,
    },
    Rule {
        name: "victim_did_not_contribute",
        check: victim_did_not_contribute,
        reason: victim_did_not_contribute_reason,
    },
    Rule {
        name: "filed_within_deadline",
        check: filed_within_deadline,
        reason: filed_within_deadline_reason,
    },
    Rule {
        name: "minor_guardian_will_sign",
        check: minor_guardian_will_sign,
        reason: minor_guardian_will_sign_reason,
    },
];

/// Classify an answer set. Pure and total: unanswered questions lower
/// readiness instead of failing.
pub fn evaluate(answers: &EligibilityAnswers) -> EligibilityOutcome {
    run(answers, |_, _| {})
}

/// Same as [`evaluate`], also recording every rule that fired
pub fn explain(answers: &EligibilityAnswers) -> EligibilityReport {
    let mut findings = Vec::new();
    let outcome = run(answers, |rule, effect| {
        findings.push(RuleFinding {
            rule: rule.name,
            effect,
            reason: (rule.reason)(effect),
        });
    });

    EligibilityReport { outcome, findings }
}

fn run<F>(answers: &EligibilityAnswers, mut on_fire: F) -> EligibilityOutcome
where
    F: FnMut(&Rule, RuleEffect),
{
    let mut readiness = Readiness::Ready;

    for rule in RULES {
        let effect = (rule.check)(answers);
        if effect == RuleEffect::Pass {
            continue;
        }

        debug!("Rule {} fired: {:?}", rule.name, effect);
        on_fire(rule, effect);

        match effect {
            RuleEffect::Pass => {}
            RuleEffect::Downgrade(proposed) => readiness = readiness.max(proposed),
            RuleEffect::Terminal(result) => {
                return EligibilityOutcome::new(result, Readiness::Ready);
            }
        }
    }

    EligibilityOutcome::new(EligibilityResult::Eligible, readiness)
}

pub fn applicant_not_covered(answers: &EligibilityAnswers) -> RuleEffect {
    match answers.applicant_type {
        Some(ApplicantType::NotCovered) => RuleEffect::Terminal(EligibilityResult::NotEligible),
        _ => RuleEffect::Pass,
    }
}

pub fn applicant_unanswered(answers: &EligibilityAnswers) -> RuleEffect {
    match answers.applicant_type {
        None => RuleEffect::Terminal(EligibilityResult::NeedsReview),
        Some(_) => RuleEffect::Pass,
    }
}

pub fn crime_in_indiana(answers: &EligibilityAnswers) -> RuleEffect {
    match answers.crime_in_indiana {
        Some(Answer::No) => RuleEffect::Terminal(EligibilityResult::NotEligible),
        Some(Answer::Yes) => RuleEffect::Pass,
        Some(Answer::NotSure) | None => RuleEffect::Downgrade(Readiness::MissingInfo),
    }
}

pub fn reported_and_cooperated(answers: &EligibilityAnswers) -> RuleEffect {
    missing_unless_yes(answers.reported_and_cooperated)
}

pub fn meets_minimum_loss(answers: &EligibilityAnswers) -> RuleEffect {
    missing_unless_yes(answers.meets_minimum_loss)
}

pub fn victim_did_not_contribute(answers: &EligibilityAnswers) -> RuleEffect {
    match answers.victim_did_not_contribute {
        Some(Answer::No) => RuleEffect::Terminal(EligibilityResult::NotEligible),
        Some(Answer::Yes) => RuleEffect::Pass,
        Some(Answer::NotSure) | None => RuleEffect::Downgrade(Readiness::MissingInfo),
    }
}

pub fn filed_within_deadline(answers: &EligibilityAnswers) -> RuleEffect {
    missing_unless_yes(answers.filed_within_deadline)
}

pub fn minor_guardian_will_sign(answers: &EligibilityAnswers) -> RuleEffect {
    match answers.minor_guardian_will_sign {
        Some(GuardianAnswer::No) => RuleEffect::Downgrade(Readiness::NotReady),
        Some(GuardianAnswer::Yes) | Some(GuardianAnswer::NotApplicable) => RuleEffect::Pass,
        Some(GuardianAnswer::NotSure) | None => RuleEffect::Downgrade(Readiness::MissingInfo),
    }
}

fn missing_unless_yes(answer: Option<Answer>) -> RuleEffect {
    match answer {
        Some(Answer::Yes) => RuleEffect::Pass,
        Some(Answer::No) | Some(Answer::NotSure) | None => RuleEffect::Downgrade(Readiness::MissingInfo),
    }
}

fn applicant_not_covered_reason(_: RuleEffect) -> &'static str {
    "Applicant is not a victim, surviving spouse or dependent child"
}

fn applicant_unanswered_reason(_: RuleEffect) -> &'static str {
    "Applicant category has not been answered"
}

fn crime_in_indiana_reason(effect: RuleEffect) -> &'static str {
    match effect {
        RuleEffect::Terminal(_) => "Crime did not occur in Indiana",
        _ => "Crime location is not confirmed",
    }
}

fn reported_and_cooperated_reason(_: RuleEffect) -> &'static str {
    "Timely police report and cooperation are not confirmed"
}

fn meets_minimum_loss_reason(_: RuleEffect) -> &'static str {
    "Minimum out-of-pocket loss is not confirmed"
}

fn victim_did_not_contribute_reason(effect: RuleEffect) -> &'static str {
    match effect {
        RuleEffect::Terminal(_) => "Victim contributed to the crime",
        _ => "Victim non-contribution is not confirmed",
    }
}

fn filed_within_deadline_reason(_: RuleEffect) -> &'static str {
    "Filing within the deadline is not confirmed"
}

fn minor_guardian_will_sign_reason(effect: RuleEffect) -> &'static str {
    match effect {
        RuleEffect::Downgrade(Readiness::NotReady) => "Guardian will not sign for a minor applicant",
        _ => "Guardian signature for a minor applicant is not confirmed",
    }
}
