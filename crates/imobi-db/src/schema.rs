//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! Identifiers are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1: initial table definitions
// -----------------------------------------------------------------------

// Domain and slug columns are indexed for lookup but not UNIQUE: several
// brokers may leave them unset, and claims are checked when written.
const SCHEMA_V1: &str = "\
-- =======================================================================
-- Brokers (tenants)
-- =======================================================================
DEFINE TABLE broker SCHEMAFULL;
DEFINE FIELD name ON TABLE broker TYPE string;
DEFINE FIELD business_name ON TABLE broker TYPE string;
DEFINE FIELD email ON TABLE broker TYPE string;
DEFINE FIELD custom_domain ON TABLE broker TYPE option<string>;
DEFINE FIELD subdomain ON TABLE broker TYPE option<string>;
DEFINE FIELD website_slug ON TABLE broker TYPE option<string>;
DEFINE FIELD is_active ON TABLE broker TYPE bool DEFAULT true;
DEFINE FIELD plan_type ON TABLE broker TYPE string \
    ASSERT $value IN ['free', 'basic', 'premium', 'enterprise'];
DEFINE FIELD theme_settings ON TABLE broker TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD site_title ON TABLE broker TYPE option<string>;
DEFINE FIELD site_description ON TABLE broker TYPE option<string>;
DEFINE FIELD site_favicon_url ON TABLE broker TYPE option<string>;
DEFINE FIELD created_at ON TABLE broker TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE broker TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_broker_custom_domain ON TABLE broker \
    COLUMNS custom_domain;
DEFINE INDEX idx_broker_subdomain ON TABLE broker \
    COLUMNS subdomain;
DEFINE INDEX idx_broker_website_slug ON TABLE broker \
    COLUMNS website_slug;

-- =======================================================================
-- Profiles (user ↔ broker association)
-- =======================================================================
DEFINE TABLE profile SCHEMAFULL;
DEFINE FIELD email ON TABLE profile TYPE string;
DEFINE FIELD role ON TABLE profile TYPE string \
    ASSERT $value IN ['user', 'admin', 'super_admin'];
DEFINE FIELD broker_id ON TABLE profile TYPE option<string>;
DEFINE FIELD created_at ON TABLE profile TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE profile TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_profile_broker ON TABLE profile \
    COLUMNS broker_id;
";

/// Run all pending migrations against the given SurrealDB instance.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_defines_tenant_tables() {
        assert!(SCHEMA_V1.contains("DEFINE TABLE broker"));
        assert!(SCHEMA_V1.contains("DEFINE TABLE profile"));
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
