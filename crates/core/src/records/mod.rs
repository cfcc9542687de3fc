//! Client-shaped records
//!
//! These are the camelCase shapes the console works with and the shapes kept
//! in the local cache. Each record also accepts its storage (snake_case) field
//! names on input, so feeding an already-mapped row through deserialization is
//! harmless.

use serde::{Deserialize, Deserializer};

pub mod amount;
pub mod appointments;
pub mod customers;
pub mod finance;
pub mod products;
pub mod purchases;

pub use amount::{Amount, NonFiniteAmount};
pub use appointments::{Appointment, AppointmentId, AppointmentStatus};
pub use customers::{Customer, CustomerId, SkinType};
pub use finance::{FinanceKind, FinanceRecord, FinanceRecordId};
pub use products::{Product, ProductId, ProductKind, ProductStatus};
pub use purchases::{Purchase, PurchaseId};

/// Deserialize `null` as the type's default value.
///
/// The remote store returns `null` for unset columns; records treat those the
/// same as absent fields.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
