//! Data access for fruit records.
//!
//! [`FruitClient`] is the only way the rest of the crate reaches the fruit
//! collection. Ids arrive from URLs as text and are parsed here, so a malformed
//! id fails with [`StoreError::InvalidId`] without a round trip to the store.

use crate::model::{Fruit, FruitFields};
use document_store::{CollectionClient, DocumentId, StoreError};
use tracing::{debug, info, instrument};

/// The starter data written by [`FruitClient::seed`]: name and color, none ready to eat.
pub const STARTER_FRUITS: [(&str, &str); 5] = [
    ("Orange", "orange"),
    ("Grape", "purple"),
    ("Banana", "orange"),
    ("Strawberry", "red"),
    ("Coconut", "brown"),
];

pub fn starter_fruits() -> Vec<FruitFields> {
    STARTER_FRUITS
        .iter()
        .map(|(name, color)| FruitFields::new(*name, *color, false))
        .collect()
}

/// Client for the fruit collection.
#[derive(Clone)]
pub struct FruitClient {
    inner: CollectionClient<Fruit>,
}

impl FruitClient {
    pub fn new(inner: CollectionClient<Fruit>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Fruit>, StoreError> {
        debug!("Sending request");
        self.inner.list_all().await
    }

    #[instrument(skip(self))]
    pub async fn create_many(&self, fields: Vec<FruitFields>) -> Result<Vec<Fruit>, StoreError> {
        debug!("Sending request");
        self.inner.create_many(fields).await
    }

    #[instrument(skip(self))]
    pub async fn create_one(&self, fields: FruitFields) -> Result<Fruit, StoreError> {
        debug!("Sending request");
        self.inner.create_one(fields).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: &str) -> Result<Fruit, StoreError> {
        let id: DocumentId = id.parse()?;
        self.inner.find_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn update_by_id(&self, id: &str, fields: FruitFields) -> Result<Fruit, StoreError> {
        let id: DocumentId = id.parse()?;
        self.inner.update_by_id(id, fields).await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: &str) -> Result<Fruit, StoreError> {
        let id: DocumentId = id.parse()?;
        self.inner.delete_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<usize, StoreError> {
        debug!("Sending request");
        self.inner.delete_all().await
    }

    /// Wipes the collection and writes the starter fruits.
    ///
    /// The two steps are separate requests; a concurrent create can land
    /// between them and survive the reseed.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> Result<Vec<Fruit>, StoreError> {
        let removed = self.delete_all().await?;
        let fruits = self.create_many(starter_fruits()).await?;
        info!(removed, created = fruits.len(), "Seeded");
        Ok(fruits)
    }
}
