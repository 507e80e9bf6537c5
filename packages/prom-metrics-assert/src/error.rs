use prometheus::proto::MetricType;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Reading a single series out of a collector failed.
///
/// This always means the caller handed over the wrong instrument, so the
/// assertion entry points panic on it rather than reporting a failure.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("expected to collect 1 metric, but got {0}")]
    UnexpectedSeriesCount(usize),
    #[error("expected a {expected} series, but collected a {found:?} series")]
    UnexpectedKind {
        expected: &'static str,
        found: MetricType,
    },
}

/// Resolving a labeled child of a vector instrument failed.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("inconsistent label cardinality, expect {expected} label values, but got {got}")]
    InconsistentCardinality { expected: usize, got: usize },
    #[error("expected a metric vector with exactly 1 descriptor, but got {0}")]
    UnexpectedDescriptorCount(usize),
    #[error(transparent)]
    Collect(#[from] CollectError),
}

#[derive(Debug, Error)]
pub enum ExpositionError {
    #[error("registering collector failed: {0}")]
    Register(#[source] prometheus::Error),
    #[error("encoding metric families failed: {0}")]
    Encode(#[source] prometheus::Error),
    #[error("exposition is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}
