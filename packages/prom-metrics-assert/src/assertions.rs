//! One assertion per instrument kind.
//!
//! The free functions use [`AssertOptions::default`]; use [`MetricAssert`]
//! directly to change the options or to chain several checks:
//!
//! ```
//! use prom_metrics_assert::{AbsentSeries, AssertOptions, MetricAssert};
//! use prometheus::{IntCounter, IntGaugeVec, Opts};
//!
//! let served = IntCounter::new("served_total", "Requests served.").unwrap();
//! let in_flight = IntGaugeVec::new(Opts::new("in_flight", "In flight."), &["route"]).unwrap();
//! served.inc();
//!
//! let mut failures: Vec<String> = Vec::new();
//! MetricAssert::new(&mut failures)
//!     .with_options(AssertOptions::default().absent_series(AbsentSeries::Report))
//!     .counter(1.0, &served)
//!     .gauge_vec(0.0, &in_flight, &["/"]);
//! assert_eq!(failures.len(), 1);
//! ```

use crate::compare::{FailureReport, Mismatch, compare_samples, compare_scalar};
use crate::drain::{SampleStats, Snapshot, collect_samples, collect_scalar};
use crate::error::{CollectError, LookupError};
use crate::exposition::{filter_sample_sum_and_count, to_exposition};
use crate::options::{AbsentSeries, AssertOptions};
use crate::reporter::FailureReporter;
use crate::summary::{Summary, SummaryVec};
use crate::vector::find_child;
use prometheus::core::{
    Atomic, Collector, GenericCounter, GenericCounterVec, GenericGauge, GenericGaugeVec,
};
use prometheus::proto::MetricType;
use prometheus::{Histogram, HistogramVec};
use tracing::{debug, trace, warn};

/// Outcome of resolving a vector child.
enum Child {
    Found(Snapshot),
    Absent,
    /// A failure was already reported; nothing left to compare.
    Reported,
}

/// Asserts on instruments, reporting mismatches to a [`FailureReporter`].
pub struct MetricAssert<'r, R: FailureReporter + ?Sized> {
    reporter: &'r mut R,
    options: AssertOptions,
}

impl<'r, R: FailureReporter + ?Sized> MetricAssert<'r, R> {
    pub fn new(reporter: &'r mut R) -> Self {
        Self {
            reporter,
            options: AssertOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AssertOptions) -> Self {
        self.options = options;
        self
    }

    /// Asserts the value of a `Counter` or `IntCounter`.
    #[track_caller]
    pub fn counter<P: Atomic + 'static>(
        &mut self,
        expected: f64,
        counter: &GenericCounter<P>,
    ) -> &mut Self {
        self.single_scalar(expected, counter)
    }

    /// Asserts the value of one counter of a `CounterVec` or `IntCounterVec`.
    ///
    /// With the default options, asserting zero is the same as asserting that
    /// the counter was never touched.
    #[track_caller]
    pub fn counter_vec<P: Atomic + 'static>(
        &mut self,
        expected: f64,
        counter_vec: &GenericCounterVec<P>,
        label_values: &[&str],
    ) -> &mut Self {
        self.vec_scalar(expected, counter_vec, label_values)
    }

    /// Asserts the value of a `Gauge` or `IntGauge`.
    #[track_caller]
    pub fn gauge<P: Atomic + 'static>(
        &mut self,
        expected: f64,
        gauge: &GenericGauge<P>,
    ) -> &mut Self {
        self.single_scalar(expected, gauge)
    }

    /// Asserts the value of one gauge of a `GaugeVec` or `IntGaugeVec`.
    #[track_caller]
    pub fn gauge_vec<P: Atomic + 'static>(
        &mut self,
        expected: f64,
        gauge_vec: &GenericGaugeVec<P>,
        label_values: &[&str],
    ) -> &mut Self {
        self.vec_scalar(expected, gauge_vec, label_values)
    }

    /// Asserts the number and the sum of all samples observed by `histogram`.
    #[track_caller]
    pub fn histogram_samples(&mut self, count: u64, sum: f64, histogram: &Histogram) -> &mut Self {
        self.single_samples(SampleStats { count, sum }, histogram)
    }

    #[track_caller]
    pub fn histogram_vec_samples(
        &mut self,
        count: u64,
        sum: f64,
        histogram_vec: &HistogramVec,
        label_values: &[&str],
    ) -> &mut Self {
        self.vec_samples(SampleStats { count, sum }, histogram_vec, label_values)
    }

    #[track_caller]
    pub fn summary_samples(&mut self, count: u64, sum: f64, summary: &Summary) -> &mut Self {
        self.single_samples(SampleStats { count, sum }, summary)
    }

    #[track_caller]
    pub fn summary_vec_samples(
        &mut self,
        count: u64,
        sum: f64,
        summary_vec: &SummaryVec,
        label_values: &[&str],
    ) -> &mut Self {
        self.vec_samples(SampleStats { count, sum }, summary_vec, label_values)
    }

    #[track_caller]
    fn single_scalar<C: Collector>(&mut self, expected: f64, collector: &C) -> &mut Self {
        let actual = collect_scalar(collector).unwrap_or_else(|err| panic!("{err}"));
        if let Some(mismatch) = compare_scalar(expected, actual) {
            self.report(collector, mismatch, None);
        }
        self
    }

    #[track_caller]
    fn single_samples<C: Collector>(&mut self, expected: SampleStats, collector: &C) -> &mut Self {
        let actual = collect_samples(collector).unwrap_or_else(|err| panic!("{err}"));
        for mismatch in compare_samples(expected, actual) {
            self.report(collector, mismatch, None);
        }
        self
    }

    #[track_caller]
    fn vec_scalar<C>(&mut self, expected: f64, vec: &C, label_values: &[&str]) -> &mut Self
    where
        C: Collector + Clone + 'static,
    {
        let actual = match self.resolve(vec, label_values) {
            Child::Found(snapshot) => snapshot
                .scalar()
                .unwrap_or_else(|| unexpected_kind(vec, "scalar")),
            Child::Absent => 0.0,
            Child::Reported => return self,
        };
        if let Some(mismatch) = compare_scalar(expected, actual) {
            let exposition = self.exposition(vec, false);
            self.report(vec, mismatch, exposition);
        }
        self
    }

    #[track_caller]
    fn vec_samples<C>(&mut self, expected: SampleStats, vec: &C, label_values: &[&str]) -> &mut Self
    where
        C: Collector + Clone + 'static,
    {
        let actual = match self.resolve(vec, label_values) {
            Child::Found(snapshot) => snapshot
                .samples()
                .unwrap_or_else(|| unexpected_kind(vec, "histogram or summary")),
            Child::Absent => SampleStats::default(),
            Child::Reported => return self,
        };
        let mismatches = compare_samples(expected, actual);
        if mismatches.is_empty() {
            return self;
        }
        let exposition = self.exposition(vec, true);
        for mismatch in mismatches {
            self.report(vec, mismatch, exposition.clone());
        }
        self
    }

    #[track_caller]
    fn resolve<C>(&mut self, vec: &C, label_values: &[&str]) -> Child
    where
        C: Collector + Clone + 'static,
    {
        match find_child(vec, label_values) {
            Ok(Some(snapshot)) => Child::Found(snapshot),
            Ok(None) => match self.options.get_absent_series() {
                AbsentSeries::TreatAsZero => {
                    trace!(
                        metric = %metric_name(vec),
                        labels = ?label_values,
                        "no series observed for label values, reading as zero"
                    );
                    Child::Absent
                }
                AbsentSeries::Report => {
                    let mismatch = Mismatch {
                        title: "Series not found",
                        expected: format!("{label_values:?}"),
                        actual: "no series with these label values".to_string(),
                    };
                    let exposition = self.exposition(vec, false);
                    self.report(vec, mismatch, exposition);
                    Child::Reported
                }
            },
            Err(LookupError::Collect(err)) => panic!("{err}"),
            Err(err) => {
                debug!(metric = %metric_name(vec), error = %err, "metric lookup failed");
                self.reporter.report_failure(err.to_string());
                Child::Reported
            }
        }
    }

    fn exposition<C>(&self, vec: &C, sum_and_count_only: bool) -> Option<String>
    where
        C: Collector + Clone + 'static,
    {
        if !self.options.get_attach_exposition() {
            return None;
        }
        let exposition = match to_exposition(vec) {
            Ok(exposition) if sum_and_count_only => filter_sample_sum_and_count(&exposition),
            Ok(exposition) => exposition,
            Err(err) => {
                warn!(metric = %metric_name(vec), error = %err, "failed to render metric");
                err.to_string()
            }
        };
        Some(exposition)
    }

    #[track_caller]
    fn report<C: Collector + ?Sized>(
        &mut self,
        collector: &C,
        mismatch: Mismatch,
        exposition: Option<String>,
    ) {
        debug!(
            metric = %metric_name(collector),
            title = mismatch.title,
            expected = %mismatch.expected,
            actual = %mismatch.actual,
            "metric assertion failed"
        );
        self.reporter
            .report_failure(FailureReport::new(mismatch, exposition).to_string());
    }
}

fn metric_name<C: Collector + ?Sized>(collector: &C) -> String {
    collector
        .desc()
        .first()
        .map(|desc| desc.fq_name.clone())
        .unwrap_or_default()
}

#[track_caller]
fn unexpected_kind<C: Collector + ?Sized>(collector: &C, expected: &'static str) -> ! {
    let found = collector
        .collect()
        .first()
        .map(|family| family.get_field_type())
        .unwrap_or(MetricType::UNTYPED);
    panic!("{}", CollectError::UnexpectedKind { expected, found })
}

/// Asserts the value of a `Counter` or `IntCounter`.
///
/// ```
/// # use prom_metrics_assert::{assert_counter, PanicReporter};
/// # let counter = prometheus::Counter::new("c", "Counter.").unwrap();
/// counter.inc_by(10.0);
/// assert_counter(&mut PanicReporter, 10.0, &counter);
/// ```
#[track_caller]
pub fn assert_counter<R, P>(reporter: &mut R, expected: f64, counter: &GenericCounter<P>)
where
    R: FailureReporter + ?Sized,
    P: Atomic + 'static,
{
    MetricAssert::new(reporter).counter(expected, counter);
}

/// Asserts the value of the counter of `counter_vec` identified by
/// `label_values`.
///
/// ```
/// # use prom_metrics_assert::{assert_counter_vec, PanicReporter};
/// # use prometheus::{CounterVec, Opts};
/// # let counter_vec = CounterVec::new(Opts::new("c", "Counter."), &["a", "b"]).unwrap();
/// counter_vec.with_label_values(&["a-label", "another-label"]).inc_by(10.0);
/// assert_counter_vec(&mut PanicReporter, 10.0, &counter_vec, &["a-label", "another-label"]);
/// ```
///
/// Asserting that the value of a counter is 0 is equivalent to asserting that
/// the counter does not exist.
#[track_caller]
pub fn assert_counter_vec<R, P>(
    reporter: &mut R,
    expected: f64,
    counter_vec: &GenericCounterVec<P>,
    label_values: &[&str],
) where
    R: FailureReporter + ?Sized,
    P: Atomic + 'static,
{
    MetricAssert::new(reporter).counter_vec(expected, counter_vec, label_values);
}

/// Asserts the value of a `Gauge` or `IntGauge`.
#[track_caller]
pub fn assert_gauge<R, P>(reporter: &mut R, expected: f64, gauge: &GenericGauge<P>)
where
    R: FailureReporter + ?Sized,
    P: Atomic + 'static,
{
    MetricAssert::new(reporter).gauge(expected, gauge);
}

/// Asserts the value of the gauge of `gauge_vec` identified by `label_values`.
///
/// Asserting that the value of a gauge is 0 is equivalent to asserting that
/// the gauge does not exist.
#[track_caller]
pub fn assert_gauge_vec<R, P>(
    reporter: &mut R,
    expected: f64,
    gauge_vec: &GenericGaugeVec<P>,
    label_values: &[&str],
) where
    R: FailureReporter + ?Sized,
    P: Atomic + 'static,
{
    MetricAssert::new(reporter).gauge_vec(expected, gauge_vec, label_values);
}

/// Asserts the count and sum of all samples captured by `histogram`.
///
/// ```
/// # use prom_metrics_assert::{assert_histogram_samples, PanicReporter};
/// # use prometheus::{Histogram, HistogramOpts};
/// # let histogram = Histogram::with_opts(HistogramOpts::new("h", "Histogram.")).unwrap();
/// histogram.observe(10.0);
/// histogram.observe(20.0);
/// assert_histogram_samples(&mut PanicReporter, 2, 30.0, &histogram);
/// ```
#[track_caller]
pub fn assert_histogram_samples<R>(reporter: &mut R, count: u64, sum: f64, histogram: &Histogram)
where
    R: FailureReporter + ?Sized,
{
    MetricAssert::new(reporter).histogram_samples(count, sum, histogram);
}

/// Asserts the count and sum of all samples captured by the histogram of
/// `histogram_vec` identified by `label_values`.
#[track_caller]
pub fn assert_histogram_vec_samples<R>(
    reporter: &mut R,
    count: u64,
    sum: f64,
    histogram_vec: &HistogramVec,
    label_values: &[&str],
) where
    R: FailureReporter + ?Sized,
{
    MetricAssert::new(reporter).histogram_vec_samples(count, sum, histogram_vec, label_values);
}

#[track_caller]
pub fn assert_summary_samples<R>(reporter: &mut R, count: u64, sum: f64, summary: &Summary)
where
    R: FailureReporter + ?Sized,
{
    MetricAssert::new(reporter).summary_samples(count, sum, summary);
}

#[track_caller]
pub fn assert_summary_vec_samples<R>(
    reporter: &mut R,
    count: u64,
    sum: f64,
    summary_vec: &SummaryVec,
    label_values: &[&str],
) where
    R: FailureReporter + ?Sized,
{
    MetricAssert::new(reporter).summary_vec_samples(count, sum, summary_vec, label_values);
}
