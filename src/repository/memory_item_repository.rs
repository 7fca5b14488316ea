//! An in-memory item repository, for tests and for callers without a database.

use super::item_repository::{CreateItemParams, GetAllItemsParams, Item, ItemQuerier, UpdateItemParams};
use crate::infra::error::{StoreError, StoreResult};
use chrono::{SubsecRound, Utc};
use tracing::instrument;
use uuid::Uuid;

const TITLE_NOT_EMPTY: &str = "items_title_not_empty";
const OWNER_TITLE_UNIQUE: &str = "items_owner_id_title_key";

/// The rows of an in-memory store.
///
/// Plays the part of a connection for [`MemoryItemRepository`].
#[derive(Clone, Debug, Default)]
pub struct MemoryDb {
    items: Vec<Item>,
}

impl MemoryDb {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: Uuid) -> StoreResult<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| {
                tracing::warn!("Item not found");
                StoreError::NotFound
            })
    }

    /// Checks the same constraints as the `items` table, in the same order.
    fn check(&self, candidate: &Item) -> StoreResult<()> {
        if candidate.title.is_empty() {
            return Err(StoreError::constraint(TITLE_NOT_EMPTY));
        }
        let taken = self.items.iter().any(|item| {
            item.id != candidate.id
                && item.owner_id == candidate.owner_id
                && item.title == candidate.title
        });
        if taken {
            return Err(StoreError::constraint(OWNER_TITLE_UNIQUE));
        }
        Ok(())
    }
}

/// An item repository that keeps items in a [`MemoryDb`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryItemRepository;

#[async_trait::async_trait]
impl ItemQuerier for MemoryItemRepository {
    type Handle = MemoryDb;

    #[instrument(skip(self, db))]
    async fn create_item(&self, db: &mut MemoryDb, params: CreateItemParams) -> StoreResult<Item> {
        let item = Item {
            id: Uuid::new_v4(),
            owner_id: params.owner_id,
            title: params.title,
            description: params.description,
            // Postgres stores microseconds.
            created_at: Utc::now().trunc_subsecs(6),
        };
        db.check(&item)?;
        db.items.push(item.clone());
        tracing::info!("Created item {:?}", item);
        Ok(item)
    }

    #[instrument(skip(self, db))]
    async fn delete_item(&self, db: &mut MemoryDb, id: Uuid) -> StoreResult<()> {
        let index = db.position(id)?;
        db.items.remove(index);
        tracing::info!("Deleted item");
        Ok(())
    }

    #[instrument(skip(self, db))]
    async fn find_item(&self, db: &mut MemoryDb, id: Uuid) -> StoreResult<Item> {
        let index = db.position(id)?;
        Ok(db.items[index].clone())
    }

    #[instrument(skip(self, db))]
    async fn get_all_items(&self, db: &mut MemoryDb, params: GetAllItemsParams) -> StoreResult<Vec<Item>> {
        let mut items: Vec<&Item> = db
            .items
            .iter()
            .filter(|item| params.owner_id.map_or(true, |owner_id| item.owner_id == owner_id))
            .collect();
        items.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        let offset = usize::try_from(params.pagination.offset()).unwrap_or(0);
        let limit = usize::try_from(params.pagination.limit()).unwrap_or(0);
        let items: Vec<Item> = items.into_iter().skip(offset).take(limit).cloned().collect();
        tracing::info!("Listed {} items", items.len());
        Ok(items)
    }

    #[instrument(skip(self, db))]
    async fn update_item(&self, db: &mut MemoryDb, params: UpdateItemParams) -> StoreResult<Item> {
        let index = db.position(params.id)?;
        let mut item = db.items[index].clone();
        if let Some(title) = params.title {
            item.title = title;
        }
        if let Some(description) = params.description {
            item.description = Some(description);
        }
        db.check(&item)?;
        db.items[index] = item.clone();
        tracing::info!("Updated item {:?}", item);
        Ok(item)
    }
}
