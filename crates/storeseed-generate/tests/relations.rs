use std::collections::{BTreeMap, HashSet};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use storeseed_core::{Order, Table};
use storeseed_generate::{Pool, RelationOptions, build_order_relations};
use storeseed_store::{MemoryStore, Store};

fn orders(count: i32) -> Vec<Order> {
    (1..=count)
        .map(|id| Order {
            id,
            ..Order::default()
        })
        .collect()
}

async fn open_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.begin().await.expect("begin");
    store
}

#[tokio::test]
async fn every_order_gets_distinct_products_from_the_pool() {
    let mut store = open_store().await;
    let products = Pool::new(Table::Products, (100..120).collect()).expect("pool");
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let summary = build_order_relations(
        &mut store,
        &orders(25),
        &products,
        RelationOptions {
            batch_size: 10,
            max_per_order: 5,
        },
        &mut rng,
    )
    .await
    .expect("fan out");
    store.commit().await.expect("commit");

    let relations = &store.committed().relations;
    assert_eq!(summary.orders, 25);
    assert_eq!(summary.flushes, 3);
    assert_eq!(summary.relations, relations.len());

    let mut per_order: BTreeMap<i32, HashSet<i32>> = BTreeMap::new();
    for relation in relations {
        assert!(products.as_slice().contains(&relation.product_id));
        let inserted = per_order
            .entry(relation.order_id)
            .or_default()
            .insert(relation.product_id);
        assert!(inserted, "duplicate product for order {}", relation.order_id);
    }
    assert_eq!(per_order.len(), 25);
    assert!(per_order.values().all(|picks| (1..=5).contains(&picks.len())));
}

#[tokio::test]
async fn flushed_rows_keep_launch_order() {
    let mut store = open_store().await;
    let products = Pool::new(Table::Products, (1..=8).collect()).expect("pool");
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    build_order_relations(
        &mut store,
        &orders(40),
        &products,
        RelationOptions::default(),
        &mut rng,
    )
    .await
    .expect("fan out");
    store.commit().await.expect("commit");

    let order_ids: Vec<i32> = store
        .committed()
        .relations
        .iter()
        .map(|relation| relation.order_id)
        .collect();
    let mut sorted = order_ids.clone();
    sorted.sort();
    assert_eq!(order_ids, sorted);
}

#[tokio::test]
async fn single_product_pool_caps_each_order_at_one() {
    let mut store = open_store().await;
    let products = Pool::new(Table::Products, vec![7]).expect("pool");
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let summary = build_order_relations(
        &mut store,
        &orders(12),
        &products,
        RelationOptions::default(),
        &mut rng,
    )
    .await
    .expect("fan out");

    assert_eq!(summary.relations, 12);
    assert_eq!(summary.flushes, 1);
}

#[tokio::test]
async fn no_orders_writes_nothing() {
    let mut store = open_store().await;
    let products = Pool::new(Table::Products, vec![1, 2]).expect("pool");
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    let summary = build_order_relations(
        &mut store,
        &[],
        &products,
        RelationOptions::default(),
        &mut rng,
    )
    .await
    .expect("fan out");

    assert_eq!(summary.relations, 0);
    assert_eq!(summary.flushes, 0);
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn same_seed_gives_same_links() {
    let products = Pool::new(Table::Products, (1..=30).collect()).expect("pool");
    let mut outputs = Vec::new();
    for _ in 0..2 {
        let mut store = open_store().await;
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        build_order_relations(
            &mut store,
            &orders(50),
            &products,
            RelationOptions::default(),
            &mut rng,
        )
        .await
        .expect("fan out");
        store.commit().await.expect("commit");
        outputs.push(store.committed().relations.clone());
    }
    assert_eq!(outputs[0], outputs[1]);
}
