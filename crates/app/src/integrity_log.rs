//! Default integrity channel: structured `error!` events on a dedicated target.

use lendstock_domain::integrity::IntegrityViolation;

use crate::ports::IntegrityReporter;

/// Log target used for integrity violations, so operators can route them
/// apart from ordinary request failures.
pub const TARGET: &str = "lendstock::integrity";

/// Reports violations through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingIntegrityReporter;

impl IntegrityReporter for TracingIntegrityReporter {
    fn report(&self, violation: &IntegrityViolation) {
        tracing::error!(
            target: TARGET,
            kind = %violation.kind,
            equipment_id = %violation.equipment_id,
            rental_id = ?violation.rental_id,
            expected_count = ?violation.expected_count,
            cause = %violation.cause,
            "data integrity violation: stock count needs manual reconciliation"
        );
    }
}
