//! Exact comparison of expected and actual values, and the messages that
//! describe a mismatch.

use crate::drain::SampleStats;
use std::fmt;

/// One expected/actual pair that did not match.
#[derive(Clone, Debug, PartialEq)]
pub struct Mismatch {
    pub title: &'static str,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:\nexpected: {}\nactual  : {}",
            self.title, self.expected, self.actual
        )
    }
}

/// A mismatch together with the context handed to the test author.
#[derive(Clone, Debug, PartialEq)]
pub struct FailureReport {
    pub mismatch: Mismatch,
    /// The instrument rendered in the text exposition format.
    pub exposition: Option<String>,
}

impl FailureReport {
    pub fn new(mismatch: Mismatch, exposition: Option<String>) -> Self {
        Self {
            mismatch,
            exposition,
        }
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mismatch)?;
        if let Some(exposition) = &self.exposition {
            write!(f, "\n\nmetric:\n{exposition}")?;
        }
        Ok(())
    }
}

pub fn compare_scalar(expected: f64, actual: f64) -> Option<Mismatch> {
    if actual == expected {
        return None;
    }
    Some(Mismatch {
        title: "Not equal",
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}

/// Compares count and sum independently; both may mismatch.
pub fn compare_samples(expected: SampleStats, actual: SampleStats) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();
    if actual.count != expected.count {
        mismatches.push(Mismatch {
            title: "Sample count not equal",
            expected: expected.count.to_string(),
            actual: actual.count.to_string(),
        });
    }
    if actual.sum != expected.sum {
        mismatches.push(Mismatch {
            title: "Sample sum not equal",
            expected: expected.sum.to_string(),
            actual: actual.sum.to_string(),
        });
    }
    mismatches
}
