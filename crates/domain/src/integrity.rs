//! Integrity violations — a compensating write that could not be applied.
//!
//! These are not ordinary errors: the use-case already failed or already
//! committed, and the store is now known to disagree with the rental
//! invariant. They are surfaced on their own channel so an operator can
//! reconcile the stock by hand.

use std::fmt;

use serde::Serialize;

use crate::id::{EquipmentId, RentalId};

/// Which compensating action was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A unit was reserved, the rental insert failed, and restoring the
    /// count failed too: one unit is missing with no rental holding it.
    ReservationLeaked,
    /// A rental was deleted but its unit was not released back.
    ReleaseLost,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservationLeaked => f.write_str("reservation leaked"),
            Self::ReleaseLost => f.write_str("release lost"),
        }
    }
}

/// A detected disagreement between `available_count` and active rentals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityViolation {
    pub kind: ViolationKind,
    pub equipment_id: EquipmentId,
    pub rental_id: Option<RentalId>,
    /// Count the equipment should have had after the compensating write.
    pub expected_count: Option<u32>,
    /// Rendered cause of the failed compensating write.
    pub cause: String,
}

impl IntegrityViolation {
    #[must_use]
    pub fn reservation_leaked(
        equipment_id: EquipmentId,
        expected_count: u32,
        cause: impl fmt::Display,
    ) -> Self {
        Self {
            kind: ViolationKind::ReservationLeaked,
            equipment_id,
            rental_id: None,
            expected_count: Some(expected_count),
            cause: cause.to_string(),
        }
    }

    #[must_use]
    pub fn release_lost(
        equipment_id: EquipmentId,
        rental_id: RentalId,
        expected_count: Option<u32>,
        cause: impl fmt::Display,
    ) -> Self {
        Self {
            kind: ViolationKind::ReleaseLost,
            equipment_id,
            rental_id: Some(rental_id),
            expected_count,
            cause: cause.to_string(),
        }
    }
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on equipment {}", self.kind, self.equipment_id)?;
        if let Some(rental_id) = self.rental_id {
            write!(f, " (rental {rental_id})")?;
        }
        if let Some(count) = self.expected_count {
            write!(f, ", expected count {count}")?;
        }
        write!(f, ": {}", self.cause)
    }
}
