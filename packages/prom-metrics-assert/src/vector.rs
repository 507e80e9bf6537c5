//! Resolves one labeled child of a vector instrument.

use crate::drain::{Snapshot, series};
use crate::error::{CollectError, LookupError};
use prometheus::core::Collector;
use prometheus::proto::Metric;

/// Finds the child of `vec` whose variable labels carry `label_values`, in
/// the order the vector declared its label names.
///
/// Returns `Ok(None)` when the combination was never observed. Unlike
/// `MetricVec::get_metric_with_label_values`, the lookup does not create the
/// child, so the vector renders the same before and after.
pub fn find_child<C: Collector + ?Sized>(
    vec: &C,
    label_values: &[&str],
) -> Result<Option<Snapshot>, LookupError> {
    let descs = vec.desc();
    let desc = match descs.as_slice() {
        [desc] => *desc,
        other => return Err(LookupError::UnexpectedDescriptorCount(other.len())),
    };
    if desc.variable_labels.len() != label_values.len() {
        return Err(LookupError::InconsistentCardinality {
            expected: desc.variable_labels.len(),
            got: label_values.len(),
        });
    }

    let families = vec.collect();
    let matching: Vec<_> = series(&families)
        .into_iter()
        .filter(|(_, metric)| has_label_values(metric, &desc.variable_labels, label_values))
        .collect();
    match matching.as_slice() {
        [] => Ok(None),
        [(kind, metric)] => Ok(Some(Snapshot::from_series(*kind, metric))),
        other => Err(CollectError::UnexpectedSeriesCount(other.len()).into()),
    }
}

fn has_label_values(metric: &Metric, names: &[String], values: &[&str]) -> bool {
    names.iter().zip(values).all(|(name, value)| {
        metric
            .get_label()
            .iter()
            .any(|pair| pair.get_name() == name.as_str() && pair.get_value() == *value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drain::SampleStats;
    use crate::test_utils::DuplicatedCounter;
    use assert_matches::assert_matches;
    use prometheus::{GaugeVec, HistogramOpts, HistogramVec, IntCounter, Opts};

    fn heroes() -> GaugeVec {
        let opts = Opts::new("heroes", "Heroes on duty.").const_label("city", "gotham");
        GaugeVec::new(opts, &["hero", "villain"]).unwrap()
    }

    #[test]
    fn finds_observed_child() {
        let vec = heroes();
        vec.with_label_values(&["batman", "joker"]).set(2.0);
        vec.with_label_values(&["batman", "riddler"]).set(5.0);

        assert_matches!(
            find_child(&vec, &["batman", "riddler"]),
            Ok(Some(Snapshot::Scalar(value))) if value == 5.0
        );
    }

    #[test]
    fn label_values_are_positional() {
        let vec = heroes();
        vec.with_label_values(&["joker", "batman"]).set(1.0);

        assert_matches!(find_child(&vec, &["batman", "joker"]), Ok(None));
    }

    #[test]
    fn missing_child_is_not_created() {
        let vec = heroes();
        vec.with_label_values(&["batman", "joker"]).set(2.0);

        assert_matches!(find_child(&vec, &["foo", "bar"]), Ok(None));
        assert_eq!(vec.collect()[0].get_metric().len(), 1);
    }

    #[test]
    fn finds_histogram_child() {
        let vec =
            HistogramVec::new(HistogramOpts::new("latency", "Latency."), &["route"]).unwrap();
        vec.with_label_values(&["/"]).observe(0.5);

        assert_matches!(
            find_child(&vec, &["/"]),
            Ok(Some(Snapshot::Samples(SampleStats { count: 1, sum }))) if sum == 0.5
        );
    }

    #[test]
    fn rejects_wrong_cardinality() {
        let vec = heroes();

        assert_matches!(
            find_child(&vec, &["batman"]),
            Err(LookupError::InconsistentCardinality {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn single_instrument_has_no_variable_labels() {
        let counter = IntCounter::new("plain", "Plain counter.").unwrap();
        counter.inc();

        assert_matches!(
            find_child(&counter, &[]),
            Ok(Some(Snapshot::Scalar(value))) if value == 1.0
        );
    }

    #[test]
    fn rejects_collector_with_several_descriptors() {
        let collector = DuplicatedCounter::new("duplicated");

        assert_matches!(
            find_child(&collector, &[]),
            Err(LookupError::UnexpectedDescriptorCount(2))
        );
    }
}
