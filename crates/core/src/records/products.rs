//! Product Records

use serde::{Deserialize, Serialize};

use crate::{
    ids::TypedId,
    records::{Amount, null_as_default},
};

/// Product Id
pub type ProductId = TypedId<Product>;

/// Whether a product is sold as a one-off service or as a multi-use voucher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// A single service; one purchased unit is worth one credit.
    #[default]
    Single,

    /// A voucher; one purchased unit is worth `count` credits.
    Voucher,
}

/// Product availability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// On sale.
    #[default]
    Active,

    /// Withdrawn from sale.
    Inactive,
}

/// Product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: ProductId,

    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    /// Unit price in won, as entered.
    #[serde(deserialize_with = "null_as_default")]
    pub price: Amount,

    /// Single service or voucher.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: ProductKind,

    /// Credits granted per purchased voucher unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    /// Availability.
    #[serde(deserialize_with = "null_as_default")]
    pub status: ProductStatus,

    /// Free-text description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

impl Product {
    /// Number of consumption credits one purchased unit is worth.
    ///
    /// Always at least 1; a single-service product is worth exactly one credit
    /// whatever its `count` says.
    pub fn unit_credits(&self) -> u32 {
        match self.kind {
            ProductKind::Single => 1,
            ProductKind::Voucher => self.count.filter(|count| *count > 0).unwrap_or(1),
        }
    }
}
