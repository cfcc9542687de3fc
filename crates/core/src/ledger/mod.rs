//! Credit Ledger
//!
//! Derives how many service credits a customer has left on each product from
//! two append-only event streams: purchases (credits in) and appointments
//! (credits out). Nothing here is persisted; balances are recomputed from the
//! events every time they are requested.

use serde::{Deserialize, Serialize};

use crate::records::{Appointment, AppointmentStatus};

mod balance;
mod tally;

pub use balance::{VoucherBalance, voucher_balances};
pub use tally::CreditTally;

/// Which appointments consume a credit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionPolicy {
    /// Every appointment consumes one credit, whatever its status or date.
    #[default]
    EveryAppointment,

    /// Cancelled and no-show appointments do not consume a credit.
    ExcludeCancelled,
}

impl ConsumptionPolicy {
    /// Whether the appointment consumes a credit under this policy.
    pub fn consumes(self, appointment: &Appointment) -> bool {
        match self {
            Self::EveryAppointment => true,
            Self::ExcludeCancelled => !matches!(
                appointment.status,
                Some(AppointmentStatus::Cancelled | AppointmentStatus::NoShow)
            ),
        }
    }
}
