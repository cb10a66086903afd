//! Loan eligibility estimate.
//!
//! DESIGN
//! ======
//! The estimate is a pure function of an injected random source: a score is
//! drawn uniformly from 300..=850 and eligibility is `score >= 650`.
//! Ineligible results carry two or three distinct rejection reasons drawn
//! from a fixed list by re-drawing duplicates. Nothing here reads real
//! financial data and nothing can fail.

use rand::Rng;
use serde::Serialize;

pub const MIN_SCORE: u16 = 300;
pub const MAX_SCORE: u16 = 850;
pub const ELIGIBLE_SCORE: u16 = 650;

const MIN_INTEREST_RATE: f64 = 7.99;
const MAX_INTEREST_RATE: f64 = 12.99;

pub const REJECTION_REASONS: [&str; 5] = [
    "High credit utilization ratio (over 50%)",
    "Recent late payment within the last 3 months",
    "Multiple credit inquiries in the past 6 months",
    "Insufficient credit history (less than 2 years)",
    "Debt-to-income ratio exceeds our threshold",
];

pub const LOAN_AMOUNT_RANGE: &str = "$5,000 - $25,000";
pub const LOAN_TERM_RANGE: &str = "12 - 60 months";

const ELIGIBLE_MESSAGE: &str = "Based on your credit score, you are eligible for a loan. \
One of our representatives will contact you shortly to discuss available options.";
const NOT_ELIGIBLE_MESSAGE: &str = "Based on your credit score, you are not eligible for a loan at this time.";
const IMPROVEMENT_NOTE: &str = "We recommend improving these areas and reapplying in 3-6 months.";

/// Result of one form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanAssessment {
    pub credit_score: u16,
    pub eligible: bool,
    pub reasons: Vec<&'static str>,
}

/// Produce a fresh assessment.
#[must_use]
pub fn assess<R: Rng + ?Sized>(rng: &mut R) -> LoanAssessment {
    let credit_score = rng.random_range(MIN_SCORE..=MAX_SCORE);
    let eligible = credit_score >= ELIGIBLE_SCORE;
    let reasons = if eligible { Vec::new() } else { pick_reasons(rng) };
    LoanAssessment { credit_score, eligible, reasons }
}

fn pick_reasons<R: Rng + ?Sized>(rng: &mut R) -> Vec<&'static str> {
    let count = rng.random_range(2..=3);
    let mut picked: Vec<&'static str> = Vec::with_capacity(count);
    while picked.len() < count {
        let reason = REJECTION_REASONS[rng.random_range(0..REJECTION_REASONS.len())];
        if !picked.contains(&reason) {
            picked.push(reason);
        }
    }
    picked
}

/// Display-only interest rate in 7.99..=12.99, rounded to cents.
#[must_use]
pub fn interest_rate<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let raw = rng.random_range(MIN_INTEREST_RATE..=MAX_INTEREST_RATE);
    (raw * 100.0).round() / 100.0
}

/// Score band used to color the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ScoreBand {
    #[must_use]
    pub fn of(score: u16) -> Self {
        match score {
            s if s < 580 => Self::Poor,
            s if s < 670 => Self::Fair,
            s if s < 740 => Self::Good,
            _ => Self::Excellent,
        }
    }
}

/// Terms offered to eligible applicants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanTerms {
    pub amount: &'static str,
    pub interest_rate: String,
    pub term: &'static str,
}

/// Rendered result panel. Built on every read, so the rate changes each time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentView {
    #[serde(flatten)]
    pub assessment: LoanAssessment,
    pub band: ScoreBand,
    pub headline: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement_note: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<LoanTerms>,
}

impl LoanAssessment {
    /// Render for display, drawing a fresh interest rate when eligible.
    #[must_use]
    pub fn render<R: Rng + ?Sized>(&self, rng: &mut R) -> AssessmentView {
        let (headline, message) = if self.eligible {
            ("Congratulations!", ELIGIBLE_MESSAGE)
        } else {
            ("We're Sorry", NOT_ELIGIBLE_MESSAGE)
        };
        let terms = self.eligible.then(|| LoanTerms {
            amount: LOAN_AMOUNT_RANGE,
            interest_rate: format!("{:.2}%", interest_rate(rng)),
            term: LOAN_TERM_RANGE,
        });
        let improvement_note = (!self.eligible && !self.reasons.is_empty()).then_some(IMPROVEMENT_NOTE);

        AssessmentView {
            assessment: self.clone(),
            band: ScoreBand::of(self.credit_score),
            headline,
            message,
            improvement_note,
            terms,
        }
    }
}

#[cfg(test)]
#[path = "loan_test.rs"]
mod tests;
