//! SurrealDB implementation of [`ProfileRepository`].

use chrono::{DateTime, Utc};
use imobi_core::error::ImobiResult;
use imobi_core::models::broker::BrokerId;
use imobi_core::models::profile::{CreateProfile, Profile, Role};
use imobi_core::repository::ProfileRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ProfileRow {
    email: String,
    role: String,
    broker_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self, id: Uuid) -> Result<Profile, DbError> {
        Ok(Profile {
            id,
            email: self.email,
            role: self.role.parse::<Role>().map_err(DbError::Corrupt)?,
            broker_id: self.broker_id.map(BrokerId::new),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Profile repository.
#[derive(Clone)]
pub struct SurrealProfileRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealProfileRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ProfileRepository for SurrealProfileRepository<C> {
    async fn create(&self, input: CreateProfile) -> ImobiResult<Profile> {
        let id_str = input.id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('profile', $id) SET \
                 email = $email, role = $role, broker_id = $broker_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("email", input.email))
            .bind(("role", input.role.as_str()))
            .bind(("broker_id", input.broker_id.map(|b| b.to_string())))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ProfileRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "profile".into(),
            id: id_str,
        })?;

        Ok(row.into_profile(input.id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> ImobiResult<Profile> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('profile', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProfileRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "profile".into(),
            id: id_str,
        })?;

        Ok(row.into_profile(id)?)
    }
}
