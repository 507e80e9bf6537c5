//! Reads the current value of a single-series instrument.

use crate::error::CollectError;
use prometheus::core::Collector;
use prometheus::proto::{Metric, MetricFamily, MetricType};

/// Count and sum of all samples observed by a histogram or summary.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SampleStats {
    pub count: u64,
    pub sum: f64,
}

/// Point-in-time value of one series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Snapshot {
    /// Counter, gauge or untyped series.
    Scalar(f64),
    /// Histogram or summary series.
    Samples(SampleStats),
}

impl Snapshot {
    /// Reads the value of `metric`, interpreted according to its family type.
    pub fn from_series(kind: MetricType, metric: &Metric) -> Self {
        match kind {
            MetricType::COUNTER => Snapshot::Scalar(metric.get_counter().get_value()),
            MetricType::GAUGE => Snapshot::Scalar(metric.get_gauge().get_value()),
            MetricType::UNTYPED => Snapshot::Scalar(metric.get_untyped().get_value()),
            MetricType::HISTOGRAM => {
                let histogram = metric.get_histogram();
                Snapshot::Samples(SampleStats {
                    count: histogram.get_sample_count(),
                    sum: histogram.get_sample_sum(),
                })
            }
            MetricType::SUMMARY => {
                let summary = metric.get_summary();
                Snapshot::Samples(SampleStats {
                    count: summary.get_sample_count(),
                    sum: summary.get_sample_sum(),
                })
            }
        }
    }

    pub fn scalar(self) -> Option<f64> {
        match self {
            Snapshot::Scalar(value) => Some(value),
            Snapshot::Samples(_) => None,
        }
    }

    pub fn samples(self) -> Option<SampleStats> {
        match self {
            Snapshot::Scalar(_) => None,
            Snapshot::Samples(stats) => Some(stats),
        }
    }
}

/// Flattens `families` into their series, each tagged with its family type.
pub(crate) fn series(families: &[MetricFamily]) -> Vec<(MetricType, &Metric)> {
    families
        .iter()
        .flat_map(|family| {
            let kind = family.get_field_type();
            family.get_metric().iter().map(move |metric| (kind, metric))
        })
        .collect()
}

/// Collects `collector` and returns its one and only series.
///
/// Vector instruments must be resolved to a child first (see
/// [`crate::vector::find_child`]); collecting a vector with more or less than
/// one child is an error.
pub fn collect_one<C: Collector + ?Sized>(collector: &C) -> Result<Snapshot, CollectError> {
    collect_typed(collector).map(|(_, snapshot)| snapshot)
}

pub(crate) fn collect_scalar<C: Collector + ?Sized>(collector: &C) -> Result<f64, CollectError> {
    let (kind, snapshot) = collect_typed(collector)?;
    snapshot.scalar().ok_or(CollectError::UnexpectedKind {
        expected: "scalar",
        found: kind,
    })
}

pub(crate) fn collect_samples<C: Collector + ?Sized>(
    collector: &C,
) -> Result<SampleStats, CollectError> {
    let (kind, snapshot) = collect_typed(collector)?;
    snapshot.samples().ok_or(CollectError::UnexpectedKind {
        expected: "histogram or summary",
        found: kind,
    })
}

fn collect_typed<C: Collector + ?Sized>(
    collector: &C,
) -> Result<(MetricType, Snapshot), CollectError> {
    let families = collector.collect();
    match series(&families).as_slice() {
        [(kind, metric)] => Ok((*kind, Snapshot::from_series(*kind, metric))),
        other => Err(CollectError::UnexpectedSeriesCount(other.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use prometheus::{Counter, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts};

    #[test]
    fn collects_counter_value() {
        let counter = Counter::new("drain_counter", "A counter.").unwrap();
        counter.inc_by(4.5);

        assert_eq!(collect_one(&counter).unwrap(), Snapshot::Scalar(4.5));
    }

    #[test]
    fn collects_int_gauge_value() {
        let gauge = IntGauge::new("drain_gauge", "A gauge.").unwrap();
        gauge.set(-3);

        assert_eq!(collect_scalar(&gauge).unwrap(), -3.0);
    }

    #[test]
    fn collects_histogram_count_and_sum() {
        let histogram =
            Histogram::with_opts(HistogramOpts::new("drain_histogram", "A histogram.")).unwrap();
        histogram.observe(1.5);
        histogram.observe(2.0);

        assert_eq!(
            collect_samples(&histogram).unwrap(),
            SampleStats { count: 2, sum: 3.5 }
        );
    }

    #[test]
    fn rejects_vector_with_several_children() {
        let vec =
            IntCounterVec::new(Opts::new("drain_vec", "A vector."), &["hero", "villain"]).unwrap();
        vec.with_label_values(&["batman", "joker"]).inc();
        vec.with_label_values(&["superman", "lex luthor"]).inc();

        assert_matches!(
            collect_one(&vec),
            Err(CollectError::UnexpectedSeriesCount(2))
        );
    }

    #[test]
    fn rejects_empty_vector() {
        let vec = IntCounterVec::new(Opts::new("drain_empty", "A vector."), &["hero"]).unwrap();

        assert_matches!(
            collect_one(&vec),
            Err(CollectError::UnexpectedSeriesCount(0))
        );
    }

    #[test]
    fn rejects_wrong_kind() {
        let counter = Counter::new("drain_kind", "A counter.").unwrap();

        assert_matches!(
            collect_samples(&counter),
            Err(CollectError::UnexpectedKind {
                found: MetricType::COUNTER,
                ..
            })
        );
    }
}
