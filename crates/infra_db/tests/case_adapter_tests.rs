//! PostgreSQL case adapter tests
//!
//! These start a PostgreSQL container and are ignored by default:
//! `cargo test -p infra_db -- --ignored` with Docker available.

use core_kernel::{HealthCheckable, PortError, UserId};
use domain_case::sections::{Injury, PhysicalInjury};
use domain_case::{CasePort, CaseQuery, CaseStatus, CreateCaseRequest, SectionId, SectionPayload};
use infra_db::PostgresCaseAdapter;
use test_utils::{
    assert_conflict, create_isolated_test_database, MinimalSections, SequenceCaseNumbers,
};

fn request(owner_id: UserId, case_number: Option<&str>) -> CreateCaseRequest {
    CreateCaseRequest {
        owner_id,
        case_number: case_number.map(str::to_string),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn create_and_fetch_case() {
    let db = create_isolated_test_database().await.unwrap();
    let adapter = PostgresCaseAdapter::new(db.pool().clone());
    let owner = UserId::new_v7();

    let created = adapter.create_case(request(owner, None)).await.unwrap();
    assert_eq!(created.status, CaseStatus::InProgress);
    assert_eq!(created.completion_percentage(), 0);

    let fetched = adapter.get_case(created.id).await.unwrap();
    assert_eq!(fetched.case_number, created.case_number);
    assert_eq!(fetched.owner_id, owner);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn duplicate_case_number_is_conflict() {
    let db = create_isolated_test_database().await.unwrap();
    let adapter = PostgresCaseAdapter::new(db.pool().clone());
    let owner = UserId::new_v7();

    adapter
        .create_case(request(owner, Some("MLR-2024-123456")))
        .await
        .unwrap();
    let err = adapter
        .create_case(request(owner, Some("MLR-2024-123456")))
        .await
        .unwrap_err();
    assert_conflict(&err);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn generated_case_number_is_redrawn_on_collision() {
    let db = create_isolated_test_database().await.unwrap();
    let numbers = SequenceCaseNumbers::new(&["MLR-2024-000001", "MLR-2024-000002"]);
    let adapter =
        PostgresCaseAdapter::new(db.pool().clone()).with_number_generator(numbers.clone());
    let owner = UserId::new_v7();

    adapter
        .create_case(request(owner, Some("MLR-2024-000001")))
        .await
        .unwrap();
    let created = adapter.create_case(request(owner, None)).await.unwrap();

    assert_eq!(created.case_number, "MLR-2024-000002");
    assert_eq!(numbers.drawn(), 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn saved_sections_round_trip_with_completion() {
    let db = create_isolated_test_database().await.unwrap();
    let adapter = PostgresCaseAdapter::new(db.pool().clone());
    let case = adapter
        .create_case(request(UserId::new_v7(), None))
        .await
        .unwrap();

    for payload in MinimalSections::all() {
        adapter.save_section(case.id, payload).await.unwrap();
    }

    let stored = adapter.get_case(case.id).await.unwrap();
    assert_eq!(stored.completion_percentage(), 100);
    for id in SectionId::ALL {
        assert_eq!(stored.sections.get(id), Some(MinimalSections::payload(id)));
    }

    let stored_percentage: i16 =
        sqlx::query_scalar("SELECT completion_percentage FROM cases WHERE case_id = $1")
            .bind(uuid::Uuid::from(case.id))
            .fetch_one(db.pool())
            .await
            .unwrap();
    assert_eq!(stored_percentage, 100);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn rejected_save_writes_nothing() {
    let db = create_isolated_test_database().await.unwrap();
    let adapter = PostgresCaseAdapter::new(db.pool().clone());
    let case = adapter
        .create_case(request(UserId::new_v7(), None))
        .await
        .unwrap();

    let invalid = SectionPayload::PhysicalInjury(PhysicalInjury {
        injuries: vec![Injury {
            pain_scale: Some(11),
            ..Default::default()
        }],
        ..Default::default()
    });
    let err = adapter.save_section(case.id, invalid).await.unwrap_err();
    assert!(matches!(err, PortError::Validation { .. }));

    let stored = adapter.get_case(case.id).await.unwrap();
    assert!(stored.sections.physical_injury.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn status_lifecycle_and_listing() {
    let db = create_isolated_test_database().await.unwrap();
    let adapter = PostgresCaseAdapter::new(db.pool().clone());
    let owner = UserId::new_v7();

    let first = adapter.create_case(request(owner, None)).await.unwrap();
    adapter.create_case(request(owner, None)).await.unwrap();
    adapter
        .create_case(request(UserId::new_v7(), None))
        .await
        .unwrap();

    let archived = adapter
        .update_status(first.id, CaseStatus::Archived)
        .await
        .unwrap();
    assert_eq!(archived.status, CaseStatus::Archived);

    let err = adapter
        .save_section(first.id, MinimalSections::payload(SectionId::Prognosis))
        .await
        .unwrap_err();
    assert_conflict(&err);

    let mine = adapter.list_cases(CaseQuery::for_owner(owner)).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].id, first.id);

    let only_archived = adapter
        .list_cases(CaseQuery::for_owner(owner).with_status(CaseStatus::Archived))
        .await
        .unwrap();
    assert_eq!(only_archived.len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn delete_and_health() {
    let db = create_isolated_test_database().await.unwrap();
    let adapter = PostgresCaseAdapter::new(db.pool().clone());
    let case = adapter
        .create_case(request(UserId::new_v7(), None))
        .await
        .unwrap();

    adapter.delete_case(case.id).await.unwrap();
    assert!(adapter.get_case(case.id).await.unwrap_err().is_not_found());

    let health = adapter.health_check().await;
    assert!(health.status.is_operational());
}
