//! Purchase Records

use serde::{Deserialize, Serialize};

use crate::{
    ids::TypedId,
    records::{Amount, customers::CustomerId, null_as_default, products::ProductId},
};

/// Purchase Id
pub type PurchaseId = TypedId<Purchase>;

/// Purchase
///
/// `quantity` units of a product bought by a customer. Purchases of the same
/// product accumulate; they never overwrite each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Purchase {
    /// Purchase identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: PurchaseId,

    /// Buying customer.
    #[serde(alias = "customer_id", deserialize_with = "null_as_default")]
    pub customer_id: CustomerId,

    /// Product bought.
    #[serde(alias = "product_id", deserialize_with = "null_as_default")]
    pub product_id: ProductId,

    /// Units bought.
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: u64,

    /// Purchase time (ISO 8601).
    #[serde(alias = "purchase_date", deserialize_with = "null_as_default")]
    pub purchase_date: String,

    /// Amount charged, when recorded.
    #[serde(alias = "total_price", skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Amount>,

    /// Staff user who recorded the purchase.
    #[serde(alias = "user_id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Creation time (ISO 8601), when known.
    #[serde(alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Last update time (ISO 8601), when known.
    #[serde(alias = "updated_at", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
