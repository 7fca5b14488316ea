//! Types and functions for storing and loading items from the database.

use crate::infra::{
    database::DbConnection,
    error::{StoreError, StoreResult},
    pagination::PaginationParams,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{instrument, Instrument};
use uuid::Uuid;

/// An existing item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    /// The item's id.
    pub id: Uuid,
    /// The owner of the item.
    pub owner_id: Uuid,
    /// The item's title, unique per owner.
    pub title: String,
    /// The item's description.
    pub description: Option<String>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

/// The fields of a new item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemParams {
    /// The owner of the item.
    pub owner_id: Uuid,
    /// The item's title.
    pub title: String,
    /// The item's description.
    pub description: Option<String>,
}

/// Changes to an existing item.
///
/// Fields set to `None` keep their stored value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateItemParams {
    /// The item to update.
    pub id: Uuid,
    /// The new title.
    pub title: Option<String>,
    /// The new description.
    pub description: Option<String>,
}

/// Filters for listing items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAllItemsParams {
    /// Only list items belonging to this owner.
    pub owner_id: Option<Uuid>,
    /// Which page of items to list.
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Anything that can store and load items.
///
/// The handle to execute against is passed to every call,
/// so the caller decides which transaction the statement runs in.
#[async_trait::async_trait]
pub trait ItemQuerier: Send + Sync {
    /// What statements are executed against.
    type Handle: Send;

    /// Creates a new item.
    async fn create_item(&self, db: &mut Self::Handle, params: CreateItemParams) -> StoreResult<Item>;

    /// Deletes an item, failing with [`StoreError::NotFound`] if it does not exist.
    async fn delete_item(&self, db: &mut Self::Handle, id: Uuid) -> StoreResult<()>;

    /// Reads an item.
    async fn find_item(&self, db: &mut Self::Handle, id: Uuid) -> StoreResult<Item>;

    /// Lists items ordered by creation time.
    async fn get_all_items(
        &self,
        db: &mut Self::Handle,
        params: GetAllItemsParams,
    ) -> StoreResult<Vec<Item>>;

    /// Updates an item and returns its new state.
    async fn update_item(&self, db: &mut Self::Handle, params: UpdateItemParams) -> StoreResult<Item>;
}

/// An item repository backed by PostgreSQL.
#[derive(Clone, Copy, Debug, Default)]
pub struct PgItemRepository;

#[async_trait::async_trait]
impl ItemQuerier for PgItemRepository {
    type Handle = DbConnection;

    #[instrument(skip(self, db))]
    async fn create_item(&self, db: &mut DbConnection, params: CreateItemParams) -> StoreResult<Item> {
        tracing::info!("Creating item {:?}", params);
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (owner_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, title, description, created_at
            "#,
        )
        .bind(params.owner_id)
        .bind(params.title)
        .bind(params.description)
        .fetch_one(&mut *db)
        .await?;
        tracing::info!("Created item {:?}", item);
        Ok(item)
    }

    #[instrument(skip(self, db))]
    async fn delete_item(&self, db: &mut DbConnection, id: Uuid) -> StoreResult<()> {
        tracing::info!("Deleting item");
        let rows = sqlx::query(
            r#"
            DELETE FROM items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *db)
        .await?;

        if rows.rows_affected() == 0 {
            tracing::warn!("Item not found");
            return Err(StoreError::NotFound);
        }

        tracing::info!("Deleted item");
        Ok(())
    }

    #[instrument(skip(self, db))]
    async fn find_item(&self, db: &mut DbConnection, id: Uuid) -> StoreResult<Item> {
        tracing::info!("Reading item");
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, owner_id, title, description, created_at FROM items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *db)
        .instrument(tracing::info_span!("fetch_optional"))
        .await?;
        let Some(item) = item else {
            tracing::warn!("Item not found");
            return Err(StoreError::NotFound);
        };
        tracing::info!("Found item: {:?}", item);
        Ok(item)
    }

    #[instrument(skip(self, db))]
    async fn get_all_items(
        &self,
        db: &mut DbConnection,
        params: GetAllItemsParams,
    ) -> StoreResult<Vec<Item>> {
        tracing::info!("Listing items");
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, owner_id, title, description, created_at FROM items
            WHERE $1::uuid IS NULL OR owner_id = $1
            ORDER BY created_at, id
            LIMIT $2
            OFFSET $3
            "#,
        )
        .bind(params.owner_id)
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(&mut *db)
        .instrument(tracing::info_span!("fetch_all"))
        .await?;
        tracing::info!("Listed {} items", items.len());
        Ok(items)
    }

    #[instrument(skip(self, db))]
    async fn update_item(&self, db: &mut DbConnection, params: UpdateItemParams) -> StoreResult<Item> {
        tracing::info!("Updating item {:?}", params);
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET title = COALESCE($2, title), description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, owner_id, title, description, created_at
            "#,
        )
        .bind(params.id)
        .bind(params.title)
        .bind(params.description)
        .fetch_optional(&mut *db)
        .instrument(tracing::info_span!("fetch_optional"))
        .await?;
        let Some(item) = item else {
            tracing::warn!("Item not found");
            return Err(StoreError::NotFound);
        };
        tracing::info!("Updated item {:?}", item);
        Ok(item)
    }
}
