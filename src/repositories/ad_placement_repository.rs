use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::AdPlacement};

#[async_trait]
pub trait AdPlacementRepository: Send + Sync {
    async fn find_by_key(&self, placement_key: &str) -> AppResult<Option<AdPlacement>>;
    async fn find_all(&self) -> AppResult<Vec<AdPlacement>>;
}

pub struct MongoAdPlacementRepository {
    collection: Collection<AdPlacement>,
}

impl MongoAdPlacementRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("ad_placements");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for ad_placements collection");

        let key_index = IndexModel::builder()
            .keys(doc! { "placement_key": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("placement_key_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(key_index).await?;

        log::info!("Successfully created indexes for ad_placements collection");
        Ok(())
    }
}

#[async_trait]
impl AdPlacementRepository for MongoAdPlacementRepository {
    async fn find_by_key(&self, placement_key: &str) -> AppResult<Option<AdPlacement>> {
        let placement = self
            .collection
            .find_one(doc! { "placement_key": placement_key })
            .await?;
        Ok(placement)
    }

    async fn find_all(&self) -> AppResult<Vec<AdPlacement>> {
        let placements = self
            .collection
            .find(doc! {})
            .sort(doc! { "placement_key": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(placements)
    }
}
