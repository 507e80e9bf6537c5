/// What a vector assertion does when no child carries the requested labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AbsentSeries {
    /// Read the missing child as zero, so asserting zero succeeds.
    #[default]
    TreatAsZero,
    /// Report the missing child as a failure without comparing anything.
    Report,
}

/// Options for [`crate::MetricAssert`].
///
/// ```
/// use prom_metrics_assert::{AbsentSeries, AssertOptions};
///
/// let options = AssertOptions::default()
///     .absent_series(AbsentSeries::Report)
///     .attach_exposition(false);
/// assert_eq!(options.get_absent_series(), AbsentSeries::Report);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssertOptions {
    absent_series: AbsentSeries,
    attach_exposition: bool,
}

impl Default for AssertOptions {
    fn default() -> Self {
        Self {
            absent_series: AbsentSeries::default(),
            attach_exposition: true,
        }
    }
}

impl AssertOptions {
    pub fn absent_series(mut self, absent_series: AbsentSeries) -> Self {
        self.absent_series = absent_series;
        self
    }

    /// Whether failures on vector instruments carry the rendered vector.
    pub fn attach_exposition(mut self, attach: bool) -> Self {
        self.attach_exposition = attach;
        self
    }

    pub fn get_absent_series(&self) -> AbsentSeries {
        self.absent_series
    }

    pub fn get_attach_exposition(&self) -> bool {
        self.attach_exposition
    }
}
