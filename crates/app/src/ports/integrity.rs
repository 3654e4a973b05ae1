//! Integrity port — where failed compensating writes are reported.

use std::sync::Arc;

use lendstock_domain::integrity::IntegrityViolation;

/// Receives data-integrity violations.
///
/// Reporting is fire-and-forget: it must not fail and must not abort the
/// use-case that detected the violation.
pub trait IntegrityReporter {
    /// Record one violation.
    fn report(&self, violation: &IntegrityViolation);
}

impl<T: IntegrityReporter> IntegrityReporter for Arc<T> {
    fn report(&self, violation: &IntegrityViolation) {
        (**self).report(violation);
    }
}
