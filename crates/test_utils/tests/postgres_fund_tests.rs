//! PostgreSQL adapter tests
//!
//! Each test starts its own container, so they are ignored by default.
//! Run with `cargo test -p test_utils -- --ignored` on a host with Docker.

use std::sync::Arc;

use core_kernel::{AdapterHealth, FundId, HealthCheckable};
use domain_fund::{FundError, FundPort, FundService, FundValidator};
use infra_db::PostgresFundAdapter;
use test_utils::{
    assert_validation_on, FundFixtures, FundPayloadBuilder, TaxIdFixtures, TestDatabase,
};

#[tokio::test]
#[ignore = "requires docker"]
async fn test_insert_and_read_back() {
    let db = TestDatabase::start().await.unwrap();
    let adapter = PostgresFundAdapter::new(db.pool().clone());

    let feeder = FundFixtures::feeder();
    let inserted = adapter.insert_fund(&feeder).await.unwrap();
    assert_eq!(inserted.to_draft(), feeder);

    let fetched = adapter.get_fund(inserted.id).await.unwrap();
    assert_eq!(fetched, inserted);

    let found = adapter.find_by_tax_id(TaxIdFixtures::secondary()).await.unwrap();
    assert_eq!(found.map(|f| f.id), Some(inserted.id));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_unique_violation_is_a_conflict() {
    let db = TestDatabase::start().await.unwrap();
    let adapter = PostgresFundAdapter::new(db.pool().clone());

    adapter.insert_fund(&FundFixtures::multimercado()).await.unwrap();
    let err = adapter
        .insert_fund(&FundFixtures::multimercado())
        .await
        .unwrap_err();

    assert!(err.is_conflict(), "{:?}", err);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_update_delete_and_list() {
    let db = TestDatabase::start().await.unwrap();
    let adapter = PostgresFundAdapter::new(db.pool().clone());

    let first = adapter.insert_fund(&FundFixtures::multimercado()).await.unwrap();
    let second = adapter.insert_fund(&FundFixtures::feeder()).await.unwrap();

    let changed = FundFixtures::multimercado().with_reports(["Lâmina"]);
    let updated = adapter.update_fund(first.id, &changed).await.unwrap();
    assert_eq!(updated.reports, vec!["Lâmina".to_string()]);

    let ids: Vec<FundId> = adapter.list_funds().await.unwrap().into_iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    adapter.delete_fund(first.id).await.unwrap();
    assert!(adapter.get_fund(first.id).await.unwrap_err().is_not_found());
    assert!(adapter.delete_fund(first.id).await.unwrap_err().is_not_found());
    assert!(adapter
        .update_fund(first.id, &changed)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_service_reports_taken_tax_id() {
    let db = TestDatabase::start().await.unwrap();
    let service = FundService::new(
        Arc::new(PostgresFundAdapter::new(db.pool().clone())),
        FundValidator::new(),
    );

    let payload = FundPayloadBuilder::new().build();
    service.create(&payload).await.unwrap();
    let err = service.create(&payload).await.unwrap_err();
    assert_validation_on(&err, "st_cnpj_fundo");

    db.reset().await.unwrap();
    let fund = service.create(&payload).await.unwrap();
    assert_eq!(fund.id, FundId::new(1));
    assert!(matches!(service.retrieve(FundId::new(2)).await, Err(FundError::FundNotFound(_))));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_health_check() {
    let db = TestDatabase::start().await.unwrap();
    let adapter = PostgresFundAdapter::new(db.pool().clone());

    let result = adapter.health_check().await;
    assert_eq!(result.status, AdapterHealth::Healthy);
}
