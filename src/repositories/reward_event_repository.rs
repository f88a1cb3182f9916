use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::repositories::is_duplicate_key_error;
use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::RewardEvent,
};

/// Append-only ledger storage. Events are only ever inserted; the unique
/// idempotency key index is what turns a retried insert into a no-op.
#[async_trait]
pub trait RewardEventRepository: Send + Sync {
    /// Insert `event` unless its idempotency key is already present.
    /// Returns the stored event and whether this call inserted it.
    async fn insert_idempotent(&self, event: RewardEvent) -> AppResult<(RewardEvent, bool)>;

    async fn find_by_idempotency_key(&self, key: &str) -> AppResult<Option<RewardEvent>>;

    /// Sum of all amounts credited to the user.
    async fn balance_for_user(&self, user_id: &str) -> AppResult<i64>;

    /// The user's reward history, most recent first.
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<RewardEvent>>;
}

pub struct MongoRewardEventRepository {
    collection: Collection<RewardEvent>,
}

impl MongoRewardEventRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("reward_events");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for reward_events collection");

        let key_index = IndexModel::builder()
            .keys(doc! { "idempotency_key": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idempotency_key_unique".to_string())
                    .build(),
            )
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("user_history".to_string()).build())
            .build();

        self.collection.create_index(key_index).await?;
        self.collection.create_index(user_index).await?;

        log::info!("Successfully created indexes for reward_events collection");
        Ok(())
    }
}

#[async_trait]
impl RewardEventRepository for MongoRewardEventRepository {
    async fn insert_idempotent(&self, event: RewardEvent) -> AppResult<(RewardEvent, bool)> {
        match self.collection.insert_one(&event).await {
            Ok(_) => Ok((event, true)),
            Err(err) if is_duplicate_key_error(&err) => {
                match self.find_by_idempotency_key(&event.idempotency_key).await? {
                    Some(existing) => Ok((existing, false)),
                    // Events are never deleted, so a duplicate without a
                    // readable original indicates a storage fault.
                    None => Err(AppError::StorageError(
                        "duplicate reward event not readable".to_string(),
                    )),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_idempotency_key(&self, key: &str) -> AppResult<Option<RewardEvent>> {
        let event = self
            .collection
            .find_one(doc! { "idempotency_key": key })
            .await?;
        Ok(event)
    }

    async fn balance_for_user(&self, user_id: &str) -> AppResult<i64> {
        let mut cursor = self
            .collection
            .aggregate(vec![
                doc! { "$match": { "user_id": user_id } },
                doc! { "$group": { "_id": "$user_id", "total": { "$sum": "$amount" } } },
            ])
            .await?;

        if let Some(group) = cursor.try_next().await? {
            let total = match group.get("total") {
                Some(Bson::Int64(v)) => *v,
                Some(Bson::Int32(v)) => i64::from(*v),
                Some(Bson::Double(v)) => *v as i64,
                _ => 0,
            };
            Ok(total)
        } else {
            Ok(0)
        }
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<RewardEvent>> {
        let events = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(events)
    }
}
