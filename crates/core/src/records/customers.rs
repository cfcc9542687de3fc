//! Customer Records

use serde::{Deserialize, Serialize};

use crate::{
    ids::TypedId,
    records::{Amount, null_as_default, products::ProductId},
};

/// Customer Id
pub type CustomerId = TypedId<Customer>;

/// Skin type noted on a customer's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinType {
    /// Dry
    Dry,

    /// Oily
    Oily,

    /// Combination
    Combination,

    /// Sensitive
    Sensitive,

    /// Normal
    Normal,
}

/// Customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Customer {
    /// Customer identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: CustomerId,

    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    /// Contact phone number.
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,

    /// Birth date as entered (`YYYY-MM-DD`).
    #[serde(alias = "birth_date", deserialize_with = "null_as_default")]
    pub birth_date: String,

    /// Skin type, when recorded.
    #[serde(alias = "skin_type", skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<SkinType>,

    /// Free-text memo.
    #[serde(deserialize_with = "null_as_default")]
    pub memo: String,

    /// Loyalty point balance.
    #[serde(deserialize_with = "null_as_default")]
    pub point: Amount,

    /// Creation time (ISO 8601), when known.
    #[serde(alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Last update time (ISO 8601), when known.
    #[serde(alias = "updated_at", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Products the customer has bought, in purchase order.
    #[serde(alias = "purchased_products", deserialize_with = "null_as_default")]
    pub purchased_products: Vec<ProductId>,
}
