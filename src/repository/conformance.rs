//! Behaviour every [`ItemQuerier`] must share, checked against each implementation.

use super::item_repository::{CreateItemParams, GetAllItemsParams, Item, ItemQuerier, UpdateItemParams};
use crate::infra::{error::StoreError, pagination::PaginationParams};
use uuid::Uuid;

pub(crate) async fn create_for<Q: ItemQuerier>(
    q: &Q,
    db: &mut Q::Handle,
    owner_id: Uuid,
    title: &str,
) -> Item {
    q.create_item(
        db,
        CreateItemParams {
            owner_id,
            title: title.to_string(),
            description: Some(format!("About {title}")),
        },
    )
    .await
    .unwrap()
}

pub(crate) async fn create<Q: ItemQuerier>(q: &Q, db: &mut Q::Handle, title: &str) -> Item {
    create_for(q, db, Uuid::new_v4(), title).await
}

pub(crate) async fn assert_not_found<Q: ItemQuerier>(q: &Q, db: &mut Q::Handle, id: Uuid) {
    let err = q.find_item(db, id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound), "{err:?}");
}

fn sorted(mut items: Vec<Item>) -> Vec<Item> {
    items.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
    items
}

pub(crate) async fn create_then_find_returns_item<Q: ItemQuerier>(q: &Q, db: &mut Q::Handle) {
    let owner_id = Uuid::new_v4();
    let item = q
        .create_item(
            db,
            CreateItemParams {
                owner_id,
                title: "Foo".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(item.owner_id, owner_id);
    assert_eq!(item.title, "Foo");
    assert_eq!(item.description, None);

    let found = q.find_item(db, item.id).await.unwrap();
    assert_eq!(item, found);
}

pub(crate) async fn find_missing_fails_with_not_found<Q: ItemQuerier>(q: &Q, db: &mut Q::Handle) {
    create(q, db, "Foo").await;
    assert_not_found(q, db, Uuid::new_v4()).await;
}

pub(crate) async fn delete_then_find_fails_with_not_found<Q: ItemQuerier>(q: &Q, db: &mut Q::Handle) {
    let item = create(q, db, "Foo").await;
    let other = create(q, db, "Bar").await;

    q.delete_item(db, item.id).await.unwrap();

    assert_not_found(q, db, item.id).await;
    assert_eq!(q.find_item(db, other.id).await.unwrap(), other);
}

pub(crate) async fn delete_missing_fails_with_not_found<Q: ItemQuerier>(q: &Q, db: &mut Q::Handle) {
    let item = create(q, db, "Foo").await;
    q.delete_item(db, item.id).await.unwrap();

    let err = q.delete_item(db, item.id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound), "{err:?}");
}

pub(crate) async fn update_changes_only_given_fields<Q: ItemQuerier>(q: &Q, db: &mut Q::Handle) {
    let item = create(q, db, "Foo").await;

    let updated = q
        .update_item(
            db,
            UpdateItemParams {
                id: item.id,
                title: Some("Baz".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();

    let expected = Item {
        title: "Baz".to_string(),
        ..item.clone()
    };
    assert_eq!(updated, expected);
    assert_eq!(q.find_item(db, item.id).await.unwrap(), expected);

    let updated = q
        .update_item(
            db,
            UpdateItemParams {
                id: item.id,
                title: None,
                description: Some("Changed".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Baz");
    assert_eq!(updated.description.as_deref(), Some("Changed"));
    assert_eq!(updated.created_at, item.created_at);
    assert_eq!(updated.owner_id, item.owner_id);
}

pub(crate) async fn update_missing_fails_with_not_found<Q: ItemQuerier>(q: &Q, db: &mut Q::Handle) {
    let err = q
        .update_item(
            db,
            UpdateItemParams {
                id: Uuid::new_v4(),
                title: Some("Foo".to_string()),
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound), "{err:?}");
}

pub(crate) async fn get_all_returns_every_item_once<Q: ItemQuerier>(q: &Q, db: &mut Q::Handle) {
    let a = create(q, db, "A").await;
    let b = create(q, db, "B").await;
    let c = create(q, db, "C").await;
    q.delete_item(db, b.id).await.unwrap();

    let items = q
        .get_all_items(db, GetAllItemsParams::default())
        .await
        .unwrap();

    assert_eq!(items, sorted(vec![a, c]));
}

pub(crate) async fn get_all_on_empty_store_is_empty<Q: ItemQuerier>(q: &Q, db: &mut Q::Handle) {
    let items = q
        .get_all_items(db, GetAllItemsParams::default())
        .await
        .unwrap();
    assert!(items.is_empty());
}

pub(crate) async fn get_all_filters_by_owner_and_paginates<Q: ItemQuerier>(
    q: &Q,
    db: &mut Q::Handle,
) {
    let owner_id = Uuid::new_v4();
    let mut owned = Vec::new();
    for title in ["A", "B", "C", "D", "E"] {
        owned.push(create_for(q, db, owner_id, title).await);
    }
    create(q, db, "A").await;

    let mut params = GetAllItemsParams {
        owner_id: Some(owner_id),
        pagination: PaginationParams::new(0, 2),
    };
    let mut pages = Vec::new();
    loop {
        let page = q.get_all_items(db, params).await.unwrap();
        if page.is_empty() {
            break;
        }
        pages.push(page);
        params.pagination = params.pagination.next();
    }

    assert_eq!(
        pages.iter().map(Vec::len).collect::<Vec<_>>(),
        vec![2, 2, 1]
    );
    assert_eq!(pages.concat(), sorted(owned));

    let all = q
        .get_all_items(db, GetAllItemsParams::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 6);
}

pub(crate) async fn duplicate_title_is_constraint_violation<Q: ItemQuerier>(
    q: &Q,
    db: &mut Q::Handle,
) {
    let item = create(q, db, "Foo").await;
    create(q, db, "Foo").await;

    let err = q
        .create_item(
            db,
            CreateItemParams {
                owner_id: item.owner_id,
                title: "Foo".to_string(),
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.violated_constraint(), Some("items_owner_id_title_key"));
}

pub(crate) async fn rename_to_duplicate_title_is_constraint_violation<Q: ItemQuerier>(
    q: &Q,
    db: &mut Q::Handle,
) {
    let owner_id = Uuid::new_v4();
    create_for(q, db, owner_id, "Foo").await;
    let bar = create_for(q, db, owner_id, "Bar").await;

    let err = q
        .update_item(
            db,
            UpdateItemParams {
                id: bar.id,
                title: Some("Foo".to_string()),
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.violated_constraint(), Some("items_owner_id_title_key"));
}

pub(crate) async fn empty_title_is_constraint_violation<Q: ItemQuerier>(q: &Q, db: &mut Q::Handle) {
    let err = q
        .create_item(
            db,
            CreateItemParams {
                owner_id: Uuid::new_v4(),
                title: String::new(),
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.violated_constraint(), Some("items_title_not_empty"));
}

pub(crate) async fn get_all_with_out_of_range_pagination<Q: ItemQuerier>(
    q: &Q,
    db: &mut Q::Handle,
) {
    let owner_id = Uuid::new_v4();
    let mut owned = Vec::new();
    for title in ["A", "B", "C"] {
        owned.push(create_for(q, db, owner_id, title).await);
    }
    let owned = sorted(owned);

    let negative_page: GetAllItemsParams = serde_json::from_value(serde_json::json!({
        "ownerId": owner_id,
        "page": -1,
        "pageSize": 2,
    }))
    .unwrap();
    let items = q.get_all_items(db, negative_page).await.unwrap();
    assert_eq!(items, owned[..2].to_vec());

    let negative_size: GetAllItemsParams = serde_json::from_value(serde_json::json!({
        "ownerId": owner_id,
        "pageSize": -2,
    }))
    .unwrap();
    let items = q.get_all_items(db, negative_size).await.unwrap();
    assert!(items.is_empty());

    let huge_page = GetAllItemsParams {
        owner_id: Some(owner_id),
        pagination: PaginationParams::new(i64::MAX / 2, 50),
    };
    let items = q.get_all_items(db, huge_page).await.unwrap();
    assert!(items.is_empty());
}
