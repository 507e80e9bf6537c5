//! Assertions on the values recorded by Prometheus instruments.
//!
//! Each assertion reads the current value of an instrument, compares it to an
//! expected value with exact equality and, on mismatch, hands a readable
//! message to a [`FailureReporter`]:
//!
//! ```
//! use prom_metrics_assert::{assert_counter_vec, PanicReporter};
//! use prometheus::{CounterVec, Opts};
//!
//! let requests = CounterVec::new(
//!     Opts::new("requests_total", "Requests served."),
//!     &["method", "status"],
//! )
//! .unwrap();
//! requests.with_label_values(&["GET", "200"]).inc_by(3.0);
//!
//! assert_counter_vec(&mut PanicReporter, 3.0, &requests, &["GET", "200"]);
//! // A label combination that was never observed reads as zero.
//! assert_counter_vec(&mut PanicReporter, 0.0, &requests, &["POST", "500"]);
//! ```
//!
//! Failures on vector instruments carry the whole vector rendered in the text
//! exposition format, so the test author sees every label combination and not
//! only the one that was compared.

pub mod assertions;
pub mod compare;
pub mod drain;
pub mod error;
pub mod exposition;
pub mod options;
pub mod reporter;
pub mod summary;
#[cfg(test)]
mod test_utils;
pub mod vector;

pub use assertions::{
    MetricAssert, assert_counter, assert_counter_vec, assert_gauge, assert_gauge_vec,
    assert_histogram_samples, assert_histogram_vec_samples, assert_summary_samples,
    assert_summary_vec_samples,
};
pub use compare::{FailureReport, Mismatch};
pub use drain::{SampleStats, Snapshot, collect_one};
pub use error::{CollectError, ExpositionError, LookupError};
pub use exposition::{filter_sample_sum_and_count, to_exposition};
pub use options::{AbsentSeries, AssertOptions};
pub use reporter::{FailureReporter, PanicReporter};
pub use summary::{Summary, SummaryVec};
pub use vector::find_child;
