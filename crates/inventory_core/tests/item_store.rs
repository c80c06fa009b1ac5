use inventory_core::{Item, ItemStore, RepoError, StoreConfig, StoreError};

fn apples() -> Item {
    Item::new(1, "Apples", 10.0, 20)
}

fn bananas() -> Item {
    Item::new(2, "Bananas", 15.0, 97)
}

async fn open_store() -> ItemStore {
    ItemStore::open(StoreConfig::in_memory()).await.unwrap()
}

async fn add_one_item(store: &ItemStore) {
    store.insert(&apples()).await.unwrap();
}

async fn add_two_items(store: &ItemStore) {
    store.insert(&apples()).await.unwrap();
    store.insert(&bananas()).await.unwrap();
}

#[tokio::test]
async fn insert_puts_item_into_all_items() {
    let store = open_store().await;
    add_one_item(&store).await;

    let all_items = store.get_all_items().first().await.unwrap();
    assert_eq!(all_items[0], apples());

    store.close().await.unwrap();
}

#[tokio::test]
async fn get_all_items_returns_items_in_insert_order() {
    let store = open_store().await;
    add_two_items(&store).await;

    let all_items = store.get_all_items().first().await.unwrap();
    assert_eq!(all_items, vec![apples(), bananas()]);

    store.close().await.unwrap();
}

#[tokio::test]
async fn insert_makes_item_readable_by_id() {
    let store = open_store().await;
    add_one_item(&store).await;

    let item = store.get_item(1).first().await.unwrap();
    assert_eq!(item, Some(apples()));

    store.close().await.unwrap();
}

#[tokio::test]
async fn update_replaces_first_item() {
    let store = open_store().await;
    add_one_item(&store).await;

    let updated = Item {
        name: "Coconut".to_string(),
        price: 5.00,
        quantity: 10,
        ..apples()
    };
    assert!(store.update(&updated).await.unwrap());

    let item = store.get_item(1).first().await.unwrap().unwrap();
    assert_ne!(item, apples());
    assert_eq!(item.name, "Coconut");
    assert_eq!(item.price, 5.00);
    assert_eq!(item.quantity, 10);
    assert_eq!(item, Item::new(1, "Coconut", 5.00, 10));

    store.close().await.unwrap();
}

#[tokio::test]
async fn delete_removes_first_item() {
    let store = open_store().await;
    add_one_item(&store).await;

    assert!(store.get_item(1).first().await.unwrap().is_some());
    assert!(store.delete(&apples()).await.unwrap());
    assert!(store.get_item(1).first().await.unwrap().is_none());

    store.close().await.unwrap();
}

#[tokio::test]
async fn delete_of_absent_item_leaves_table_unchanged() {
    let store = open_store().await;
    add_one_item(&store).await;

    assert!(!store.delete(&bananas()).await.unwrap());
    assert!(!store.delete_by_id(42).await.unwrap());

    let all_items = store.get_all_items().first().await.unwrap();
    assert_eq!(all_items, vec![apples()]);

    store.close().await.unwrap();
}

#[tokio::test]
async fn update_of_absent_item_does_not_insert() {
    let store = open_store().await;

    assert!(!store.update(&apples()).await.unwrap());
    assert!(store.get_all_items().first().await.unwrap().is_empty());

    store.close().await.unwrap();
}

#[tokio::test]
async fn duplicate_insert_fails_with_duplicate_id() {
    let store = open_store().await;
    add_one_item(&store).await;

    let err = store.insert(&apples()).await.unwrap_err();
    assert!(matches!(err, StoreError::Repo(RepoError::DuplicateId(1))));

    store.close().await.unwrap();
}

#[tokio::test]
async fn operations_after_close_fail_with_closed() {
    let store = open_store().await;
    add_one_item(&store).await;

    store.close().await.unwrap();
    assert!(store.is_closed());
    store.close().await.unwrap();

    assert!(matches!(
        store.insert(&bananas()).await,
        Err(StoreError::Closed)
    ));
    assert!(matches!(
        store.get_item(1).first().await,
        Err(StoreError::Closed)
    ));
}

#[tokio::test]
async fn file_backed_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.db");

    let store = ItemStore::open(StoreConfig::file(&path)).await.unwrap();
    add_two_items(&store).await;
    store.close().await.unwrap();

    let reopened = ItemStore::open(StoreConfig::file(&path)).await.unwrap();
    let all_items = reopened.get_all_items().first().await.unwrap();
    assert_eq!(all_items, vec![apples(), bananas()]);
    reopened.close().await.unwrap();
}

#[tokio::test]
async fn blocking_handle_requires_opt_in() {
    let store = open_store().await;
    assert!(matches!(
        store.blocking(),
        Err(StoreError::BlockingCallsDisabled)
    ));

    let relaxed = ItemStore::open(StoreConfig::in_memory().allow_blocking_calls())
        .await
        .unwrap();
    let blocking = relaxed.blocking().unwrap();
    blocking.insert(&apples()).unwrap();
    blocking.insert(&bananas()).unwrap();
    assert!(blocking.update(&Item::new(2, "Plantains", 12.5, 40)).unwrap());
    assert!(blocking.delete(&apples()).unwrap());

    assert_eq!(blocking.get_item(1).unwrap(), None);
    assert_eq!(
        blocking.get_all_items().unwrap(),
        vec![Item::new(2, "Plantains", 12.5, 40)]
    );
}
