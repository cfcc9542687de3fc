//! Fixtures
//!
//! Sample data sets written in YAML, in the console's record shape.

use std::{fs, path::Path};

use rustc_hash::FxHashSet;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{
    entities::EntityKind,
    records::{Appointment, Customer, FinanceRecord, Product, Purchase},
};

/// The sample data set shipped with the crate.
const BUNDLED: &str = include_str!("../../fixtures/sample.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// JSON encoding error
    #[error("Failed to encode record: {0}")]
    Json(#[from] serde_json::Error),

    /// Two records of one kind share an id
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId {
        /// Collection the duplicate was found in
        kind: &'static str,
        /// Duplicated id
        id: String,
    },

    /// Customer not found
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

/// A complete sample data set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SampleData {
    /// Customers
    pub customers: Vec<Customer>,

    /// Products and vouchers
    pub products: Vec<Product>,

    /// Purchases
    pub purchases: Vec<Purchase>,

    /// Appointments
    pub appointments: Vec<Appointment>,

    /// Finance records
    pub finance: Vec<FinanceRecord>,
}

impl SampleData {
    /// The bundled sample data set.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled YAML is invalid.
    pub fn bundled() -> Result<Self, FixtureError> {
        Self::from_yaml(BUNDLED)
    }

    /// Load a sample data set from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the YAML is invalid, or
    /// the records reference each other inconsistently.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a sample data set from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or the records reference each
    /// other inconsistently.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let data: Self = serde_norway::from_str(yaml)?;

        data.validate()?;

        Ok(data)
    }

    fn validate(&self) -> Result<(), FixtureError> {
        let customers = unique_ids("customer", self.customers.iter().map(|c| c.id.as_str()))?;
        let products = unique_ids("product", self.products.iter().map(|p| p.id.as_str()))?;

        unique_ids("purchase", self.purchases.iter().map(|p| p.id.as_str()))?;
        unique_ids("appointment", self.appointments.iter().map(|a| a.id.as_str()))?;
        unique_ids("finance", self.finance.iter().map(|f| f.id.as_str()))?;

        let references = self
            .purchases
            .iter()
            .map(|p| (p.customer_id.as_str(), p.product_id.as_str()))
            .chain(
                self.appointments
                    .iter()
                    .map(|a| (a.customer_id.as_str(), a.product_id.as_str())),
            );

        for (customer_id, product_id) in references {
            if !customers.contains(customer_id) {
                return Err(FixtureError::CustomerNotFound(customer_id.to_string()));
            }

            if !products.contains(product_id) {
                return Err(FixtureError::ProductNotFound(product_id.to_string()));
            }
        }

        Ok(())
    }

    /// The records of one entity kind, encoded as local cache entries.
    ///
    /// # Errors
    ///
    /// Returns an error if a record fails to encode.
    pub fn bucket(&self, kind: EntityKind) -> Result<Vec<Value>, FixtureError> {
        let values = match kind {
            EntityKind::Customer => encode_all(&self.customers)?,
            EntityKind::Product => encode_all(&self.products)?,
            EntityKind::Appointment => encode_all(&self.appointments)?,
            EntityKind::Finance => encode_all(&self.finance)?,
        };

        Ok(values)
    }
}

fn unique_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<FxHashSet<&'a str>, FixtureError> {
    let mut seen = FxHashSet::default();

    for id in ids {
        if !seen.insert(id) {
            return Err(FixtureError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }

    Ok(seen)
}

fn encode_all<T: serde::Serialize>(records: &[T]) -> Result<Vec<Value>, serde_json::Error> {
    records.iter().map(serde_json::to_value).collect()
}
