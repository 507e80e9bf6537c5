//! Summary instruments that plug into the `prometheus` collection model.
//!
//! The `prometheus` crate ships histograms but no summaries. These summaries
//! track no quantiles, only the number of observations and their sum, which
//! is all the sample assertions look at.

use crate::drain::SampleStats;
use parking_lot::Mutex;
use prometheus::core::{Collector, Desc, Describer, Metric, MetricVec, MetricVecBuilder};
use prometheus::proto::{self, LabelPair, MetricFamily, MetricType};
use prometheus::{Error, Opts, Result};
use std::sync::Arc;

/// A summary without quantiles. Clones share the same observations.
#[derive(Clone, Debug)]
pub struct Summary {
    core: Arc<SummaryCore>,
}

#[derive(Debug)]
struct SummaryCore {
    desc: Desc,
    label_pairs: Vec<LabelPair>,
    samples: Mutex<SampleStats>,
}

impl Summary {
    pub fn new<S1: Into<String>, S2: Into<String>>(name: S1, help: S2) -> Result<Self> {
        Self::with_opts(Opts::new(name, help))
    }

    pub fn with_opts(opts: Opts) -> Result<Self> {
        Self::with_opts_and_label_values(&opts, &[])
    }

    fn with_opts_and_label_values(opts: &Opts, label_values: &[&str]) -> Result<Self> {
        let desc = opts.describe()?;
        let label_pairs = make_label_pairs(&desc, label_values)?;
        Ok(Self {
            core: Arc::new(SummaryCore {
                desc,
                label_pairs,
                samples: Mutex::new(SampleStats::default()),
            }),
        })
    }

    pub fn observe(&self, value: f64) {
        let mut samples = self.core.samples.lock();
        samples.count += 1;
        samples.sum += value;
    }

    pub fn get_sample_count(&self) -> u64 {
        self.core.samples.lock().count
    }

    pub fn get_sample_sum(&self) -> f64 {
        self.core.samples.lock().sum
    }
}

fn make_label_pairs(desc: &Desc, label_values: &[&str]) -> Result<Vec<LabelPair>> {
    if desc.variable_labels.len() != label_values.len() {
        return Err(Error::InconsistentCardinality {
            expect: desc.variable_labels.len(),
            got: label_values.len(),
        });
    }

    let mut label_pairs = desc.const_label_pairs.clone();
    label_pairs.extend(
        desc.variable_labels
            .iter()
            .zip(label_values)
            .map(|(name, value)| {
                let mut label_pair = LabelPair::default();
                label_pair.set_name(name.clone());
                label_pair.set_value(value.to_string());
                label_pair
            }),
    );
    label_pairs.sort_by(|a, b| a.get_name().cmp(b.get_name()));
    Ok(label_pairs)
}

impl Metric for Summary {
    fn metric(&self) -> proto::Metric {
        let samples = *self.core.samples.lock();

        let mut summary = proto::Summary::default();
        summary.set_sample_count(samples.count);
        summary.set_sample_sum(samples.sum);

        let mut metric = proto::Metric::default();
        metric.set_label(self.core.label_pairs.clone().into());
        metric.set_summary(summary);
        metric
    }
}

impl Collector for Summary {
    fn desc(&self) -> Vec<&Desc> {
        vec![&self.core.desc]
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut family = MetricFamily::default();
        family.set_name(self.core.desc.fq_name.clone());
        family.set_help(self.core.desc.help.clone());
        family.set_field_type(MetricType::SUMMARY);
        family.set_metric(vec![self.metric()].into());
        vec![family]
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SummaryVecBuilder;

impl MetricVecBuilder for SummaryVecBuilder {
    type M = Summary;
    type P = Opts;

    fn build(&self, opts: &Opts, label_values: &[&str]) -> Result<Summary> {
        Summary::with_opts_and_label_values(opts, label_values)
    }
}

/// A family of [`Summary`] partitioned by label values.
#[derive(Clone)]
pub struct SummaryVec {
    inner: MetricVec<SummaryVecBuilder>,
}

impl SummaryVec {
    pub fn new(opts: Opts, label_names: &[&str]) -> Result<Self> {
        let variable_names = label_names.iter().map(|name| name.to_string()).collect();
        let opts = opts.variable_labels(variable_names);
        let inner = MetricVec::create(MetricType::SUMMARY, SummaryVecBuilder, opts)?;
        Ok(Self { inner })
    }

    /// Returns the child for `label_values`, creating it if needed.
    ///
    /// # Panics
    ///
    /// Panics if the number of label values does not match the label names.
    pub fn with_label_values(&self, label_values: &[&str]) -> Summary {
        self.inner.with_label_values(label_values)
    }

    pub fn get_metric_with_label_values(&self, label_values: &[&str]) -> Result<Summary> {
        self.inner.get_metric_with_label_values(label_values)
    }

    pub fn remove_label_values(&self, label_values: &[&str]) -> Result<()> {
        self.inner.remove_label_values(label_values)
    }

    pub fn reset(&self) {
        self.inner.reset()
    }
}

impl Collector for SummaryVec {
    fn desc(&self) -> Vec<&Desc> {
        self.inner.desc()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        self.inner.collect()
    }
}
