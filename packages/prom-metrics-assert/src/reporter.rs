/// Receives the failure messages produced by the assertions.
///
/// Reporting a failure does not stop the assertion: histogram and summary
/// checks may report a count mismatch and a sum mismatch from the same call.
pub trait FailureReporter {
    fn report_failure(&mut self, message: String);
}

/// Panics on the first failure, the way `assert_eq!` does.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanicReporter;

impl FailureReporter for PanicReporter {
    #[track_caller]
    fn report_failure(&mut self, message: String) {
        panic!("{message}");
    }
}

/// Records every failure, in the order they were reported.
impl FailureReporter for Vec<String> {
    fn report_failure(&mut self, message: String) {
        self.push(message);
    }
}

impl<R: FailureReporter + ?Sized> FailureReporter for &mut R {
    #[track_caller]
    fn report_failure(&mut self, message: String) {
        (**self).report_failure(message);
    }
}
