use std::collections::HashSet;

use chrono::{TimeZone, Utc};

use storeseed_core::Table;
use storeseed_generate::{GenerationError, SeedEngine, SeedOptions, Selection};
use storeseed_store::{MemoryStore, Store, StoreError, Tables};

fn seeded(seed: u64) -> SeedOptions {
    SeedOptions {
        chunk_size: 4,
        relation_batch_size: 3,
        seed: Some(seed),
        ..SeedOptions::default()
    }
}

#[tokio::test]
async fn single_selection_writes_only_its_table() {
    let mut store = MemoryStore::new();
    let report = SeedEngine::new(&mut store, seeded(1))
        .run(Selection::Categories, 5)
        .await
        .expect("seed categories");

    let committed = store.committed();
    assert_eq!(committed.categories.len(), 5);
    for table in Table::ALL {
        if table != Table::Categories {
            assert_eq!(committed.len(table), 0, "{table} should be empty");
        }
    }
    assert_eq!(report.rows(Table::Categories), 5);
    assert_eq!(report.tables.len(), 1);
    assert!(!store.in_transaction());
    assert!(!store.bulk_mode().is_enabled());
}

#[tokio::test]
async fn full_run_links_every_foreign_key() {
    let mut store = MemoryStore::new();
    let report = SeedEngine::new(&mut store, seeded(2))
        .run(Selection::All, 10)
        .await
        .expect("seed all");

    let Tables {
        clients,
        categories,
        products,
        reviews,
        orders,
        relations,
        reports,
    } = store.committed().clone();

    for len in [
        clients.len(),
        categories.len(),
        products.len(),
        reviews.len(),
        orders.len(),
        reports.len(),
    ] {
        assert_eq!(len, 10);
    }
    assert!((10..=50).contains(&relations.len()));
    assert_eq!(report.rows(Table::ProductOrderRelations), relations.len() as u64);

    let client_ids: HashSet<_> = clients.iter().map(|client| client.id.clone()).collect();
    let category_ids: HashSet<_> = categories.iter().map(|category| category.id).collect();
    let product_ids: HashSet<_> = products.iter().map(|product| product.id).collect();
    let order_ids: HashSet<_> = orders.iter().map(|order| order.id).collect();
    let product_names: HashSet<_> = products.iter().map(|product| product.name.clone()).collect();

    assert!(products.iter().all(|p| category_ids.contains(&p.category_id)));
    assert!(reviews.iter().all(|r| product_ids.contains(&r.product_id)));
    assert!(reviews.iter().all(|r| client_ids.contains(&r.client_id)));
    assert!(orders.iter().all(|o| client_ids.contains(&o.client_id)));
    assert!(reports.iter().all(|r| client_ids.contains(&r.client_id)));
    assert!(reports.iter().all(|r| product_names.contains(&r.title)));

    let unique: HashSet<_> = relations.iter().collect();
    assert_eq!(unique.len(), relations.len());
    for order in &orders {
        let linked = relations.iter().filter(|r| r.order_id == order.id).count();
        assert!((1..=5).contains(&linked));
    }
    assert!(relations.iter().all(|r| order_ids.contains(&r.order_id)));
    assert!(relations.iter().all(|r| product_ids.contains(&r.product_id)));
}

#[tokio::test]
async fn failed_step_rolls_back_the_whole_run() {
    let mut store = MemoryStore::new();
    store.reject_writes_to(Table::Products);
    let bulk_mode = store.bulk_mode();

    let err = SeedEngine::new(&mut store, seeded(3))
        .run(Selection::All, 10)
        .await
        .expect_err("products write must fail");

    assert!(matches!(
        err,
        GenerationError::Store(StoreError::Rejected {
            table: Table::Products
        })
    ));
    assert!(store.committed().is_empty());
    assert!(!store.in_transaction());
    assert!(!bulk_mode.is_enabled());
}

#[tokio::test]
async fn missing_parents_fail_before_writing() {
    let mut store = MemoryStore::new();
    let err = SeedEngine::new(&mut store, seeded(4))
        .run(Selection::Reviews, 3)
        .await
        .expect_err("no clients to reference");

    assert!(matches!(
        err,
        GenerationError::EmptyPool {
            table: Table::Clients
        }
    ));
    assert_eq!(store.write_count(), 0);
    assert!(!store.in_transaction());
}

#[tokio::test]
async fn orders_need_products_before_any_order_is_written() {
    let mut store = MemoryStore::new();
    SeedEngine::new(&mut store, seeded(5))
        .run(Selection::Clients, 2)
        .await
        .expect("seed clients");

    let err = SeedEngine::new(&mut store, seeded(5))
        .run(Selection::Orders, 2)
        .await
        .expect_err("no products to reference");

    assert!(matches!(
        err,
        GenerationError::EmptyPool {
            table: Table::Products
        }
    ));
    assert!(store.committed().orders.is_empty());
    assert_eq!(store.committed().clients.len(), 2);
}

#[tokio::test]
async fn zero_count_commits_an_empty_run() {
    let mut store = MemoryStore::new();
    let report = SeedEngine::new(&mut store, seeded(6))
        .run(Selection::All, 0)
        .await
        .expect("empty run");

    assert!(report.tables.is_empty());
    assert!(store.committed().is_empty());
    assert!(!store.in_transaction());
}

#[tokio::test]
async fn invalid_options_are_rejected_before_the_transaction() {
    let mut store = MemoryStore::new();
    let options = SeedOptions {
        chunk_size: 0,
        ..SeedOptions::default()
    };
    let err = SeedEngine::new(&mut store, options)
        .run(Selection::Clients, 1)
        .await
        .expect_err("chunk size 0");

    assert!(matches!(err, GenerationError::InvalidConfig(_)));
    assert!(!store.in_transaction());
}

#[tokio::test]
async fn same_seed_produces_same_dataset() {
    let reference = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
    let mut first = MemoryStore::new();
    let mut second = MemoryStore::new();

    for store in [&mut first, &mut second] {
        SeedEngine::new(store, seeded(42))
            .with_reference_time(reference)
            .run(Selection::All, 12)
            .await
            .expect("seeded run");
    }

    assert_eq!(first.committed(), second.committed());
}

#[tokio::test]
async fn engine_accepts_boxed_stores() {
    let mut store: Box<dyn Store> = Box::new(MemoryStore::new());
    let report = SeedEngine::new(store.as_mut(), seeded(7))
        .run(Selection::Clients, 3)
        .await
        .expect("seed through trait object");

    assert_eq!(report.rows(Table::Clients), 3);
    assert_eq!(store.client_ids().await.expect("client ids").len(), 3);
}
