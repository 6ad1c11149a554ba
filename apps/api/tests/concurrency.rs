//! Concurrent workflow calls against a file-backed database with several
//! pooled connections.

mod common;

use std::collections::HashSet;
use std::time::Duration;

use jati_api::OrderService;
use jati_core::{ErrorKind, NewOrder, NewPayment, OrderPaymentStatus, PaymentMethod};
use jati_db::{Database, DbConfig};
use tempfile::TempDir;

use common::{add_product, count_rows, item, reference_order};

async fn file_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new(dir.path().join("jati.db"))
        .max_connections(8)
        .busy_timeout(Duration::from_secs(10));
    let db = Database::new(config).await.unwrap();
    (dir, db)
}

fn cash(amount_cents: i64) -> NewPayment {
    NewPayment {
        amount_cents,
        method: PaymentMethod::Cash,
        reference: None,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_payments_cannot_overshoot_total() {
    let (_dir, db) = file_db().await;
    let product = add_product(&db, 10_000).await;
    let service = OrderService::new(db.clone());
    let order = service
        .create_order(reference_order(&product.id, None))
        .await
        .unwrap();
    assert_eq!(order.total_cents, 20_000);

    // Two terminals each try to take 60% of the total
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let service = service.clone();
            let order_id = order.id.clone();
            tokio::spawn(async move { service.process_payment(&order_id, cash(12_000)).await })
        })
        .collect();

    let mut accepted = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(e) => {
                assert_eq!(e.kind(), ErrorKind::InvalidArgument, "{e}");
                rejected += 1;
            }
        }
    }
    assert_eq!((accepted, rejected), (1, 1));

    assert_eq!(db.payments().sum_completed(&order.id).await.unwrap().cents(), 12_000);
    let stored = service.get_order(&order.id).await.unwrap();
    assert_eq!(stored.payment_status, OrderPaymentStatus::Pending);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_split_payments_settle_exactly_once() {
    let (_dir, db) = file_db().await;
    let product = add_product(&db, 10_000).await;
    let service = OrderService::new(db.clone());
    let order = service
        .create_order(reference_order(&product.id, None))
        .await
        .unwrap();

    // Six quarters of the total: only four fit
    let handles: Vec<_> = (0..6)
        .map(|_| {
            let service = service.clone();
            let order_id = order.id.clone();
            tokio::spawn(async move { service.process_payment(&order_id, cash(5_000)).await })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 4);

    assert_eq!(db.payments().sum_completed(&order.id).await.unwrap().cents(), 20_000);
    assert!(service.get_order(&order.id).await.unwrap().is_paid());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_receipt_requests_share_one_receipt() {
    let (_dir, db) = file_db().await;
    let product = add_product(&db, 10_000).await;
    let service = OrderService::new(db.clone());
    let order = service
        .create_order(reference_order(&product.id, None))
        .await
        .unwrap();
    service.process_payment(&order.id, cash(20_000)).await.unwrap();

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let service = service.clone();
            let order_id = order.id.clone();
            tokio::spawn(async move { service.generate_receipt(&order_id).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap().id);
    }
    assert_eq!(ids.len(), 1);
    assert_eq!(count_rows(&db, "receipts").await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_orders_get_distinct_numbers() {
    let (_dir, db) = file_db().await;
    let product = add_product(&db, 1_000).await;
    let service = OrderService::new(db.clone());

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let service = service.clone();
            let product_id = product.id.clone();
            tokio::spawn(async move {
                service
                    .create_order(NewOrder {
                        items: vec![item(&product_id, 1, 0)],
                        ..NewOrder::default()
                    })
                    .await
            })
        })
        .collect();

    let mut numbers = HashSet::new();
    for handle in handles {
        numbers.insert(handle.await.unwrap().unwrap().order_number);
    }

    let expected: HashSet<String> = (1000..1010).map(|n| format!("ORD-{n}")).collect();
    assert_eq!(numbers, expected);
    assert_eq!(count_rows(&db, "orders").await, 10);
}
