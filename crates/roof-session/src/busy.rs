//! Scoped busy flag for in-flight form submissions.

/// Sets a form's busy flag for as long as it lives.
///
/// The flag is cleared on drop, so a submission that fails, or whose future
/// is dropped mid-await, never leaves the form disabled.
pub struct BusyGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> BusyGuard<'a> {
    #[must_use]
    pub fn acquire(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}
