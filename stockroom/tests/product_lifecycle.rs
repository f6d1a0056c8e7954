//! Integration tests for the product lifecycle over real storage.
//!
//! These tests verify that:
//! 1. A collection saved through the file gateway survives a reopen
//! 2. The autosave worker keeps the stored blob in step with the catalog
//! 3. Edits keep identity and creation time across restarts
//!
//! Run with: `cargo test -p stockroom --test product_lifecycle`

use rust_decimal_macros::dec;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use stockroom::{spawn_autosave, App, Config, ProductCatalog, ProductPatch, Submission};
use stockroom_domain::{format_price, ProductDraft};
use stockroom_store::{BlobProductRepository, FileKeyValueStore, KeyValueStore, DEFAULT_STORAGE_KEY};
use uuid::Uuid;

fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("stockroom-it-{}", Uuid::now_v7().simple()))
}

fn file_config(data_dir: &Path) -> Config {
    let mut config = Config::default();
    config.storage.data_dir = data_dir.to_path_buf();
    config
}

#[tokio::test]
async fn test_collection_survives_reopen() {
    let data_dir = temp_data_dir();

    let added = {
        let app = App::open(file_config(&data_dir)).await.unwrap();
        let mut ids = Vec::new();
        for (name, price) in [("Desk Lamp", "39.99"), ("Coffee Mug", "8"), ("Office Chair", "1249.5")] {
            let submission = app
                .add(&ProductDraft::new(name, price, format!("file:///{}.jpg", name)))
                .await
                .unwrap();
            let Submission::Added { product, .. } = submission else {
                panic!("expected Added");
            };
            ids.push(product.id().clone());
        }
        assert_eq!(app.list().0.to_string(), "3 of 5 products");
        ids
    };

    // Fresh process: new app over the same directory
    let app = App::open(file_config(&data_dir)).await.unwrap();
    let (capacity, products) = app.list();

    assert_eq!(capacity.count, 3);
    let ids: Vec<_> = products.iter().map(|p| p.id().clone()).collect();
    assert_eq!(ids, added);
    assert_eq!(products[2].price().amount(), dec!(1249.5));
    assert_eq!(products[2].price().formatted(), "$1,249.50");
    assert_eq!(format_price(products[1].price().as_str()), "$8.00");

    tokio::fs::remove_dir_all(&data_dir).await.unwrap();
}

#[tokio::test]
async fn test_edit_and_delete_survive_reopen() {
    let data_dir = temp_data_dir();

    let (kept, created_at) = {
        let app = App::open(file_config(&data_dir)).await.unwrap();
        let Submission::Added { product: kept, .. } =
            app.add(&ProductDraft::new("Desk Lamp", "39.99", "lamp.jpg")).await.unwrap()
        else {
            panic!("expected Added");
        };
        let Submission::Added { product: dropped, .. } =
            app.add(&ProductDraft::new("Coffee Mug", "8", "mug.jpg")).await.unwrap()
        else {
            panic!("expected Added");
        };

        let patch = ProductPatch {
            name: Some("Floor Lamp".to_string()),
            ..Default::default()
        };
        app.edit(kept.id(), patch).await.unwrap();
        app.delete(dropped.id()).await.unwrap();

        (kept.id().clone(), kept.created_at())
    };

    let app = App::open(file_config(&data_dir)).await.unwrap();
    let product = app.show(&kept).unwrap();

    assert_eq!(app.list().1.len(), 1);
    assert_eq!(product.name().as_str(), "Floor Lamp");
    assert_eq!(product.price().as_str(), "39.99");
    assert_eq!(product.created_at(), created_at);

    tokio::fs::remove_dir_all(&data_dir).await.unwrap();
}

#[tokio::test]
async fn test_autosave_writes_through_file_gateway() {
    let data_dir = temp_data_dir();
    let gateway = Arc::new(FileKeyValueStore::open(&data_dir).await.unwrap());
    let catalog = Arc::new(ProductCatalog::new(BlobProductRepository::new(Arc::clone(&gateway))));
    catalog.load().await;

    let autosave = spawn_autosave(&catalog);

    for name in ["Alpha", "Bravo", "Charlie"] {
        assert!(catalog.submit_new(&ProductDraft::new(name, "1.5", "x.png")).is_accepted());
    }
    autosave.shutdown().await;

    let stored = gateway.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
    assert_eq!(stockroom_store::decode_products(&stored).unwrap(), catalog.products());

    // A second catalog over the same directory sees the autosaved state
    let fresh = ProductCatalog::new(BlobProductRepository::new(FileKeyValueStore::open(&data_dir).await.unwrap()));
    fresh.load().await;
    assert_eq!(fresh.products(), catalog.products());
    assert_eq!(fresh.error(), None);

    tokio::fs::remove_dir_all(&data_dir).await.unwrap();
}

#[tokio::test]
async fn test_malformed_file_is_not_overwritten() {
    let data_dir = temp_data_dir();
    let gateway = FileKeyValueStore::open(&data_dir).await.unwrap();
    gateway.set(DEFAULT_STORAGE_KEY, "[{\"id\":").await.unwrap();

    let result = App::open(file_config(&data_dir)).await;
    assert!(matches!(result, Err(stockroom::AppError::Catalog(stockroom::CatalogError::LoadFailed))));
    assert_eq!(gateway.get(DEFAULT_STORAGE_KEY).await.unwrap().as_deref(), Some("[{\"id\":"));

    tokio::fs::remove_dir_all(&data_dir).await.unwrap();
}
