/// ProgressReporter port for reporting progress during a build
///
/// This port abstracts user feedback (e.g. to stderr) so that it never
/// interferes with the rendered tree written to stdout.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports fetch progress
    ///
    /// # Arguments
    /// * `current` - Lookups completed so far
    /// * `total` - Packages discovered so far (grows while the build runs)
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
