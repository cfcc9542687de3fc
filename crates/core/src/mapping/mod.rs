//! Field Mapper
//!
//! Translates records between the client (camelCase) shape and the storage
//! (snake_case) shape. The mapping is a fixed per-field rename:
//!
//! | client              | storage              |
//! |---------------------|----------------------|
//! | `birthDate`         | `birth_date`         |
//! | `skinType`          | `skin_type`          |
//! | `purchasedProducts` | `purchased_products` |
//! | `customerId`        | `customer_id`        |
//! | `productId`         | `product_id`         |
//! | `purchaseDate`      | `purchase_date`      |
//! | `totalPrice`        | `total_price`        |
//! | `userId`            | `user_id`            |
//! | `createdAt`         | `created_at`         |
//! | `updatedAt`         | `updated_at`         |
//!
//! Both directions accept either shape on input, so mapping an already-mapped
//! record is a no-op on the fields the mapper knows. Unknown fields are dropped.
//! Absent fields take their defaults (empty string, zero, empty list); optional
//! enumerations and timestamps stay absent.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    entities::Collection,
    records::{Appointment, Customer, FinanceRecord, Product, Purchase},
};

pub mod rows;

pub use rows::{AppointmentRow, CustomerRow, FinanceRow, ProductRow, PurchaseRow};

/// A JSON object record, in either shape.
pub type JsonRecord = Map<String, Value>;

/// Field mapping errors
#[derive(Debug, Error)]
pub enum MappingError {
    /// The record is not a JSON object.
    #[error("{collection} record is not a JSON object")]
    NotAnObject {
        /// Collection the record was mapped for
        collection: Collection,
    },

    /// A known field has the wrong JSON type.
    #[error("malformed {collection} record: {source}")]
    Malformed {
        /// Collection the record was mapped for
        collection: Collection,

        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },
}

/// A client record with a storage counterpart.
pub trait Mapped: Serialize + DeserializeOwned + Sized {
    /// Storage row type.
    type Row: From<Self> + Into<Self> + Serialize + DeserializeOwned;

    /// Remote collection rows of this type live in.
    const COLLECTION: Collection;
}

impl Mapped for Customer {
    type Row = CustomerRow;
    const COLLECTION: Collection = Collection::Customers;
}

impl Mapped for Product {
    type Row = ProductRow;
    const COLLECTION: Collection = Collection::Products;
}

impl Mapped for Appointment {
    type Row = AppointmentRow;
    const COLLECTION: Collection = Collection::Appointments;
}

impl Mapped for Purchase {
    type Row = PurchaseRow;
    const COLLECTION: Collection = Collection::Purchases;
}

impl Mapped for FinanceRecord {
    type Row = FinanceRow;
    const COLLECTION: Collection = Collection::Finance;
}

/// Map a raw record of the given collection into the storage shape.
///
/// # Errors
///
/// Returns an error if the record is not an object or a known field has the
/// wrong JSON type.
pub fn to_storage(collection: Collection, record: Value) -> Result<JsonRecord, MappingError> {
    match collection {
        Collection::Customers => reshape::<CustomerRow>(collection, record),
        Collection::Products => reshape::<ProductRow>(collection, record),
        Collection::Appointments => reshape::<AppointmentRow>(collection, record),
        Collection::Finance => reshape::<FinanceRow>(collection, record),
        Collection::Purchases => reshape::<PurchaseRow>(collection, record),
    }
}

/// Map a raw record of the given collection into the client shape.
///
/// # Errors
///
/// Returns an error if the record is not an object or a known field has the
/// wrong JSON type.
pub fn to_client(collection: Collection, record: Value) -> Result<JsonRecord, MappingError> {
    match collection {
        Collection::Customers => reshape::<Customer>(collection, record),
        Collection::Products => reshape::<Product>(collection, record),
        Collection::Appointments => reshape::<Appointment>(collection, record),
        Collection::Finance => reshape::<FinanceRecord>(collection, record),
        Collection::Purchases => reshape::<Purchase>(collection, record),
    }
}

/// Encode a typed client record as a storage row.
///
/// # Errors
///
/// Returns an error if the row does not serialize to a JSON object.
pub fn into_storage<T: Mapped>(record: T) -> Result<JsonRecord, MappingError> {
    encode(T::COLLECTION, &T::Row::from(record))
}

/// Decode a storage row into a typed client record.
///
/// # Errors
///
/// Returns an error if a known field has the wrong JSON type.
pub fn from_storage<T: Mapped>(row: JsonRecord) -> Result<T, MappingError> {
    serde_json::from_value::<T::Row>(Value::Object(row))
        .map(Into::into)
        .map_err(|source| MappingError::Malformed {
            collection: T::COLLECTION,
            source,
        })
}

fn reshape<T>(collection: Collection, record: Value) -> Result<JsonRecord, MappingError>
where
    T: Serialize + DeserializeOwned,
{
    if !record.is_object() {
        return Err(MappingError::NotAnObject { collection });
    }

    let typed: T = serde_json::from_value(record)
        .map_err(|source| MappingError::Malformed { collection, source })?;

    encode(collection, &typed)
}

fn encode<T: Serialize>(collection: Collection, typed: &T) -> Result<JsonRecord, MappingError> {
    match serde_json::to_value(typed) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(MappingError::NotAnObject { collection }),
        Err(source) => Err(MappingError::Malformed { collection, source }),
    }
}
