//! Entity kinds and remote collections

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// A kind of record that lives in the local cache and can be migrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Customers
    Customer,

    /// Products and vouchers
    Product,

    /// Appointments (credit consumption)
    Appointment,

    /// Income and expense records
    Finance,
}

impl EntityKind {
    /// Every entity kind, in migration order.
    ///
    /// Appointments and finance records refer to customers and products, so
    /// those are written first.
    pub const MIGRATION_ORDER: [Self; 4] =
        [Self::Customer, Self::Product, Self::Appointment, Self::Finance];

    /// Remote collection the entity kind is stored in.
    #[must_use]
    pub const fn collection(self) -> Collection {
        match self {
            Self::Customer => Collection::Customers,
            Self::Product => Collection::Products,
            Self::Appointment => Collection::Appointments,
            Self::Finance => Collection::Finance,
        }
    }

    /// Local cache bucket holding records of this kind.
    #[must_use]
    pub const fn bucket(self) -> &'static str {
        match self {
            Self::Customer => "crm-customers",
            Self::Product => "crm-products",
            Self::Appointment => "crm-appointments",
            Self::Finance => "crm-finance",
        }
    }

    /// Short plural label, as used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.collection().table_name()
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// A remote collection (table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// `customers`
    Customers,

    /// `products`
    Products,

    /// `appointments`
    Appointments,

    /// `finance`
    Finance,

    /// `purchases`
    Purchases,
}

impl Collection {
    /// All remote collections.
    pub const ALL: [Self; 5] = [
        Self::Customers,
        Self::Products,
        Self::Appointments,
        Self::Finance,
        Self::Purchases,
    ];

    /// Table name in the remote store.
    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Appointments => "appointments",
            Self::Finance => "finance",
            Self::Purchases => "purchases",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.table_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_order_puts_referenced_kinds_first() {
        assert_eq!(
            EntityKind::MIGRATION_ORDER,
            [
                EntityKind::Customer,
                EntityKind::Product,
                EntityKind::Appointment,
                EntityKind::Finance
            ]
        );
    }

    #[test]
    fn buckets_and_tables_are_fixed() {
        assert_eq!(EntityKind::Customer.bucket(), "crm-customers");
        assert_eq!(EntityKind::Finance.bucket(), "crm-finance");
        assert_eq!(EntityKind::Appointment.collection().table_name(), "appointments");
        assert_eq!(EntityKind::Product.to_string(), "products");
    }
}
