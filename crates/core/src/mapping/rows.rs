//! Storage rows
//!
//! Snake-case mirrors of the client records. The conversions in both
//! directions are plain field renames.

use serde::{Deserialize, Serialize};

use crate::records::{
    Amount, Appointment, AppointmentId, AppointmentStatus, Customer, CustomerId, FinanceKind,
    FinanceRecord, FinanceRecordId, Product, ProductId, ProductKind, ProductStatus, Purchase,
    PurchaseId, SkinType, null_as_default,
};

/// `customers` row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerRow {
    /// Customer id.
    #[serde(deserialize_with = "null_as_default")]
    pub id: CustomerId,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Contact number, as entered.
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    /// Birth date, as entered.
    #[serde(alias = "birthDate", deserialize_with = "null_as_default")]
    pub birth_date: String,
    /// Skin type, when recorded.
    #[serde(alias = "skinType", skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<SkinType>,
    /// Free-form staff notes.
    #[serde(deserialize_with = "null_as_default")]
    pub memo: String,
    /// Loyalty points balance.
    #[serde(deserialize_with = "null_as_default")]
    pub point: Amount,
    /// Creation timestamp.
    #[serde(alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(alias = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Products the customer has bought.
    #[serde(alias = "purchasedProducts", deserialize_with = "null_as_default")]
    pub purchased_products: Vec<ProductId>,
}

/// `products` row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRow {
    /// Product id.
    #[serde(deserialize_with = "null_as_default")]
    pub id: ProductId,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Unit price in won.
    #[serde(deserialize_with = "null_as_default")]
    pub price: Amount,
    /// Single treatment or voucher.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: ProductKind,
    /// Credits granted per unit, for vouchers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Whether the product is on sale.
    #[serde(deserialize_with = "null_as_default")]
    pub status: ProductStatus,
    /// Free-form description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Creation timestamp.
    #[serde(alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(alias = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// `appointments` row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentRow {
    /// Appointment id.
    #[serde(deserialize_with = "null_as_default")]
    pub id: AppointmentId,
    /// Customer the visit belongs to.
    #[serde(alias = "customerId", deserialize_with = "null_as_default")]
    pub customer_id: CustomerId,
    /// Product booked for the visit.
    #[serde(alias = "productId", deserialize_with = "null_as_default")]
    pub product_id: ProductId,
    /// Scheduled date and time, as entered.
    #[serde(deserialize_with = "null_as_default")]
    pub datetime: String,
    /// Free-form staff notes.
    #[serde(deserialize_with = "null_as_default")]
    pub memo: String,
    /// Visit status, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    /// Owning user, when recorded.
    #[serde(alias = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Creation timestamp.
    #[serde(alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(alias = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// `purchases` row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseRow {
    /// Purchase id.
    #[serde(deserialize_with = "null_as_default")]
    pub id: PurchaseId,
    /// Buying customer.
    #[serde(alias = "customerId", deserialize_with = "null_as_default")]
    pub customer_id: CustomerId,
    /// Product bought.
    #[serde(alias = "productId", deserialize_with = "null_as_default")]
    pub product_id: ProductId,
    /// Units bought.
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: u64,
    /// Purchase date, as entered.
    #[serde(alias = "purchaseDate", deserialize_with = "null_as_default")]
    pub purchase_date: String,
    /// Amount paid, when recorded.
    #[serde(alias = "totalPrice", skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Amount>,
    /// Owning user, when recorded.
    #[serde(alias = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Creation timestamp.
    #[serde(alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(alias = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// `finance` row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceRow {
    /// Finance record id.
    #[serde(deserialize_with = "null_as_default")]
    pub id: FinanceRecordId,
    /// Booking date, as entered.
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    /// Income or expense.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: FinanceKind,
    /// Short label.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Amount in won.
    #[serde(deserialize_with = "null_as_default")]
    pub amount: u64,
    /// Free-form notes.
    #[serde(deserialize_with = "null_as_default")]
    pub memo: String,
    /// Creation timestamp.
    #[serde(alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(alias = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<Customer> for CustomerRow {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            phone: customer.phone,
            birth_date: customer.birth_date,
            skin_type: customer.skin_type,
            memo: customer.memo,
            point: customer.point,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
            purchased_products: customer.purchased_products,
        }
    }
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            phone: row.phone,
            birth_date: row.birth_date,
            skin_type: row.skin_type,
            memo: row.memo,
            point: row.point,
            created_at: row.created_at,
            updated_at: row.updated_at,
            purchased_products: row.purchased_products,
        }
    }
}

impl From<Product> for ProductRow {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            kind: product.kind,
            count: product.count,
            status: product.status,
            description: product.description,
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            kind: row.kind,
            count: row.count,
            status: row.status,
            description: row.description,
        }
    }
}

impl From<Appointment> for AppointmentRow {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            customer_id: appointment.customer_id,
            product_id: appointment.product_id,
            datetime: appointment.datetime,
            memo: appointment.memo,
            status: appointment.status,
            user_id: appointment.user_id,
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            product_id: row.product_id,
            datetime: row.datetime,
            memo: row.memo,
            status: row.status,
            user_id: row.user_id,
        }
    }
}

impl From<Purchase> for PurchaseRow {
    fn from(purchase: Purchase) -> Self {
        Self {
            id: purchase.id,
            customer_id: purchase.customer_id,
            product_id: purchase.product_id,
            quantity: purchase.quantity,
            purchase_date: purchase.purchase_date,
            total_price: purchase.total_price,
            user_id: purchase.user_id,
            created_at: purchase.created_at,
            updated_at: purchase.updated_at,
        }
    }
}

impl From<PurchaseRow> for Purchase {
    fn from(row: PurchaseRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            product_id: row.product_id,
            quantity: row.quantity,
            purchase_date: row.purchase_date,
            total_price: row.total_price,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<FinanceRecord> for FinanceRow {
    fn from(record: FinanceRecord) -> Self {
        Self {
            id: record.id,
            date: record.date,
            kind: record.kind,
            title: record.title,
            amount: record.amount,
            memo: record.memo,
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<FinanceRow> for FinanceRecord {
    fn from(row: FinanceRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            kind: row.kind,
            title: row.title,
            amount: row.amount,
            memo: row.memo,
        }
    }
}
