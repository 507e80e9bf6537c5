//! Renders instruments in the Prometheus text exposition format.

use crate::error::ExpositionError;
use lazy_static::lazy_static;
use prometheus::core::Collector;
use prometheus::{Encoder, Registry, TextEncoder};
use regex::Regex;

lazy_static! {
    /// A series line whose name ends in `_sum` or `_count`.
    static ref SAMPLE_SUM_OR_COUNT: Regex =
        Regex::new(r"^[a-zA-Z_:][a-zA-Z0-9_:]*_(sum|count)[{ ]").expect("valid regex");
}

/// Renders every series of `collector`, families sorted by name and series
/// sorted by label values.
pub fn to_exposition<C>(collector: &C) -> Result<String, ExpositionError>
where
    C: Collector + Clone + 'static,
{
    let registry = Registry::new();
    registry
        .register(Box::new(collector.clone()))
        .map_err(ExpositionError::Register)?;
    encode(&registry)
}

fn encode(registry: &Registry) -> Result<String, ExpositionError> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&registry.gather(), &mut buffer)
        .map_err(ExpositionError::Encode)?;
    Ok(String::from_utf8(buffer)?)
}

/// Keeps only the `_sum` and `_count` series of an exposition, dropping
/// comments and bucket or quantile lines.
pub fn filter_sample_sum_and_count(exposition: &str) -> String {
    exposition
        .lines()
        .filter(|line| SAMPLE_SUM_OR_COUNT.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::DuplicatedCounter;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use prometheus::{CounterVec, HistogramOpts, HistogramVec, IntGauge, Opts};

    #[test]
    fn renders_vector_children_sorted_by_labels() {
        let vec = CounterVec::new(
            Opts::new("test_counter_vec", "Test counter vec."),
            &["hero", "villain"],
        )
        .unwrap();
        vec.with_label_values(&["superman", "lex luthor"]).inc_by(100.0);
        vec.with_label_values(&["batman", "joker"]).inc_by(2.0);

        assert_eq!(
            to_exposition(&vec).unwrap(),
            r#"# HELP test_counter_vec Test counter vec.
# TYPE test_counter_vec counter
test_counter_vec{hero="batman",villain="joker"} 2
test_counter_vec{hero="superman",villain="lex luthor"} 100
"#
        );
    }

    #[test]
    fn renders_scalar_instrument() {
        let gauge = IntGauge::new("test_int_gauge", "Test int gauge.").unwrap();
        gauge.set(7);

        assert_eq!(
            to_exposition(&gauge).unwrap(),
            "# HELP test_int_gauge Test int gauge.\n# TYPE test_int_gauge gauge\ntest_int_gauge 7\n"
        );
    }

    #[test]
    fn filters_histogram_exposition() {
        let vec = HistogramVec::new(
            HistogramOpts::new("test_histogram", "Test histogram.").buckets(vec![1.0, 10.0]),
            &["hero"],
        )
        .unwrap();
        vec.with_label_values(&["batman"]).observe(5.0);

        let exposition = to_exposition(&vec).unwrap();
        assert!(exposition.contains(r#"test_histogram_bucket{hero="batman",le="10"} 1"#));

        assert_eq!(
            filter_sample_sum_and_count(&exposition),
            r#"test_histogram_sum{hero="batman"} 5
test_histogram_count{hero="batman"} 1"#
        );
    }

    #[test]
    fn filter_matches_series_name_only() {
        let exposition = "# HELP requests_count Counts requests.\n\
                          # TYPE requests_count counter\n\
                          requests_count 3\n\
                          latency_sum_total 4\n\
                          latency_summary{a=\"b\"} 1\n\
                          latency_sum{a=\"b\"} 2\n";

        assert_eq!(
            filter_sample_sum_and_count(exposition),
            "requests_count 3\nlatency_sum{a=\"b\"} 2"
        );
    }

    #[test]
    fn filter_of_empty_exposition_is_empty() {
        assert_eq!(filter_sample_sum_and_count(""), "");
    }

    #[test]
    fn unregistrable_collector_is_an_error() {
        let err = to_exposition(&DuplicatedCounter::new("duplicated")).unwrap_err();

        assert_matches!(err, ExpositionError::Register(_));
        assert!(err.to_string().starts_with("registering collector failed: "));
    }
}
