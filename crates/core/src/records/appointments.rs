//! Appointment Records

use serde::{Deserialize, Serialize};

use crate::{
    ids::TypedId,
    records::{customers::CustomerId, null_as_default, products::ProductId},
};

/// Appointment Id
pub type AppointmentId = TypedId<Appointment>;

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    /// Booked, not yet happened.
    Scheduled,

    /// Service delivered.
    Completed,

    /// Cancelled before it happened.
    Cancelled,

    /// The customer did not show up.
    NoShow,
}

/// Appointment
///
/// Every appointment is a consumption event against one product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Appointment {
    /// Appointment identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: AppointmentId,

    /// Customer the appointment belongs to.
    #[serde(alias = "customer_id", deserialize_with = "null_as_default")]
    pub customer_id: CustomerId,

    /// Product the appointment consumes a credit of.
    #[serde(alias = "product_id", deserialize_with = "null_as_default")]
    pub product_id: ProductId,

    /// Appointment time (ISO 8601).
    #[serde(deserialize_with = "null_as_default")]
    pub datetime: String,

    /// Free-text memo.
    #[serde(deserialize_with = "null_as_default")]
    pub memo: String,

    /// Lifecycle status, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,

    /// Staff user who booked the appointment.
    #[serde(alias = "user_id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}
