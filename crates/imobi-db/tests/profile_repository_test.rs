//! Integration tests for the Profile repository using in-memory SurrealDB.

use imobi_core::error::ImobiError;
use imobi_core::models::broker::BrokerId;
use imobi_core::models::profile::{CreateProfile, Role};
use imobi_core::repository::ProfileRepository;
use imobi_db::repository::SurrealProfileRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> SurrealProfileRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    imobi_db::run_migrations(&db).await.unwrap();
    SurrealProfileRepository::new(db)
}

#[tokio::test]
async fn create_and_get_profile() {
    let repo = setup().await;
    let id = Uuid::new_v4();

    let created = repo
        .create(CreateProfile {
            id,
            email: "corretor@example.com".into(),
            role: Role::Admin,
            broker_id: Some(BrokerId::new("abc123")),
        })
        .await
        .unwrap();
    assert_eq!(created.id, id);
    assert_eq!(created.role, Role::Admin);

    let fetched = repo.get_by_id(id).await.unwrap();
    assert_eq!(fetched.email, "corretor@example.com");
    assert_eq!(fetched.broker_id, Some(BrokerId::new("abc123")));
}

#[tokio::test]
async fn profile_without_broker() {
    let repo = setup().await;
    let id = Uuid::new_v4();

    repo.create(CreateProfile {
        id,
        email: "root@example.com".into(),
        role: Role::SuperAdmin,
        broker_id: None,
    })
    .await
    .unwrap();

    let fetched = repo.get_by_id(id).await.unwrap();
    assert_eq!(fetched.role, Role::SuperAdmin);
    assert!(fetched.broker_id.is_none());
}

#[tokio::test]
async fn missing_profile_is_not_found() {
    let repo = setup().await;
    let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ImobiError::NotFound { .. }));
}
