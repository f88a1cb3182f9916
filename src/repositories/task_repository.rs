use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::VideoTask};

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<VideoTask>>;
    async fn find_all(&self) -> AppResult<Vec<VideoTask>>;
}

pub struct MongoTaskRepository {
    collection: Collection<VideoTask>,
}

impl MongoTaskRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("video_tasks");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for video_tasks collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for video_tasks collection");
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for MongoTaskRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<VideoTask>> {
        let task = self.collection.find_one(doc! { "id": id }).await?;
        Ok(task)
    }

    async fn find_all(&self) -> AppResult<Vec<VideoTask>> {
        let tasks = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(tasks)
    }
}
