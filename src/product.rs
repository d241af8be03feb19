//! Product content records returned by the reference index

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// An indexed product or variant projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductContent {
    /// Product key
    pub key: Uuid,
    /// Indexed fields as JSON (name, sku, price, ...)
    pub body: Value,
    /// Keys of the collections this product belongs to
    #[serde(default)]
    pub collections: BTreeSet<Uuid>,
}

impl ProductContent {
    /// Creates a product with no collection memberships
    pub fn new(key: Uuid, body: Value) -> Self {
        Self {
            key,
            body,
            collections: BTreeSet::new(),
        }
    }

    /// Adds collection memberships
    pub fn in_collections(mut self, keys: impl IntoIterator<Item = Uuid>) -> Self {
        self.collections.extend(keys);
        self
    }

    /// Returns the value of an indexed field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }

    /// Returns an indexed field as text, if it is a string
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn sku(&self) -> Option<&str> {
        self.text("sku")
    }

    /// Returns true if the product belongs to `collection`
    pub fn is_member_of(&self, collection: &Uuid) -> bool {
        self.collections.contains(collection)
    }
}
