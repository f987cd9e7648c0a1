use crate::fruits::FruitClient;
use crate::model::Fruit;
use document_store::{Backing, Collection, StoreError, DEFAULT_CAPACITY};
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// The running fruit collection and the client that reaches it.
pub struct FruitSystem {
    /// Clone this into request state; the collection stops once every clone is gone.
    pub fruits: FruitClient,
    handle: JoinHandle<()>,
}

impl FruitSystem {
    /// Opens `backing` and spawns the collection task.
    ///
    /// Fails if existing data cannot be loaded, e.g. a corrupt JSON file.
    pub async fn start(backing: Backing, capacity: usize) -> Result<Self, StoreError> {
        info!(?backing, capacity, "Opening record store");
        let (collection, client) = Collection::<Fruit>::open(capacity, backing).await?;
        let handle = tokio::spawn(collection.run());
        Ok(Self {
            fruits: FruitClient::new(client),
            handle,
        })
    }

    /// An empty, non-persistent system.
    pub fn in_memory() -> Self {
        let (collection, client) = Collection::<Fruit>::in_memory(DEFAULT_CAPACITY);
        let handle = tokio::spawn(collection.run());
        Self {
            fruits: FruitClient::new(client),
            handle,
        }
    }

    /// Drops this system's client and waits for the collection task to finish.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down record store");
        drop(self.fruits);
        if let Err(e) = self.handle.await {
            error!(error = %e, "Record store task failed");
            return Err(e);
        }
        info!("Record store shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FruitFields;

    #[tokio::test]
    async fn test_start_serves_and_shuts_down() {
        let system = FruitSystem::start(Backing::Memory, 4).await.unwrap();
        let fruit = system
            .fruits
            .create_one(FruitFields::new("Kiwi", "green", true))
            .await
            .unwrap();
        let found = system.fruits.find_by_id(&fruit.id.to_string()).await.unwrap();
        assert_eq!(found, fruit);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_backing_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let backing = Backing::JsonFile(dir.path().join("fruits.json"));

        let system = FruitSystem::start(backing.clone(), 4).await.unwrap();
        let seeded = system.fruits.seed().await.unwrap();
        system.shutdown().await.unwrap();

        let system = FruitSystem::start(backing, 4).await.unwrap();
        assert_eq!(system.fruits.list_all().await.unwrap(), seeded);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fruits.json");
        std::fs::write(&path, "not json").unwrap();

        let result = FruitSystem::start(Backing::JsonFile(path), 4).await;
        assert!(matches!(result, Err(StoreError::Storage(_))));
    }
}
