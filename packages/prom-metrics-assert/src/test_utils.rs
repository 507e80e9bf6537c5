use prometheus::IntCounter;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;

/// A collector that describes and collects the same counter twice, which a
/// `Registry` refuses to register.
#[derive(Clone)]
pub(crate) struct DuplicatedCounter(pub IntCounter);

impl DuplicatedCounter {
    pub fn new(name: &str) -> Self {
        Self(IntCounter::new(name, "Duplicated counter.").unwrap())
    }
}

impl Collector for DuplicatedCounter {
    fn desc(&self) -> Vec<&Desc> {
        let mut descs = self.0.desc();
        descs.extend(self.0.desc());
        descs
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut families = self.0.collect();
        families.extend(self.0.collect());
        families
    }
}
