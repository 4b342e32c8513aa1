//! PostgreSQL Repository Implementation
//!
//! Collections are rows; the card list is a single JSONB column.
//! Cards are never addressed individually in SQL, the whole document
//! is rewritten on update.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::{CollectionId, UserId};

use crate::domain::entity::{Card, Collection};
use crate::domain::repository::CollectionRepository;
use crate::error::{CollectionError, CollectionResult};

/// Postgres unique-violation SQLSTATE
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed collection repository
#[derive(Clone)]
pub struct PgCollectionRepository {
    pool: PgPool,
}

impl PgCollectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CollectionRepository for PgCollectionRepository {
    async fn create(&self, collection: &Collection) -> CollectionResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO collections (
                collection_id,
                owner_id,
                title,
                description,
                cards,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(collection.collection_id.as_uuid())
        .bind(collection.owner_id.as_uuid())
        .bind(&collection.title)
        .bind(&collection.description)
        .bind(Json(&collection.cards))
        .bind(collection.created_at)
        .bind(collection.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(CollectionError::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: &CollectionId) -> CollectionResult<Option<Collection>> {
        let row = sqlx::query_as::<_, CollectionRow>(
            r#"
            SELECT
                collection_id,
                owner_id,
                title,
                description,
                cards,
                created_at,
                updated_at
            FROM collections
            WHERE collection_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CollectionRow::into_collection))
    }

    async fn find_by_owner(
        &self,
        owner_id: &UserId,
        title_filter: Option<&str>,
    ) -> CollectionResult<Vec<Collection>> {
        let rows = sqlx::query_as::<_, CollectionRow>(
            r#"
            SELECT
                collection_id,
                owner_id,
                title,
                description,
                cards,
                created_at,
                updated_at
            FROM collections
            WHERE owner_id = $1
              AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%')
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .bind(title_filter)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CollectionRow::into_collection).collect())
    }

    async fn update(&self, collection: &Collection) -> CollectionResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE collections SET
                title = $2,
                description = $3,
                cards = $4,
                updated_at = $5
            WHERE collection_id = $1
            "#,
        )
        .bind(collection.collection_id.as_uuid())
        .bind(&collection.title)
        .bind(&collection.description)
        .bind(Json(&collection.cards))
        .bind(collection.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(CollectionError::NotFound),
            Ok(_) => Ok(()),
            // A title rename can collide with another collection
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(CollectionError::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: &CollectionId) -> CollectionResult<()> {
        sqlx::query("DELETE FROM collections WHERE collection_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct CollectionRow {
    collection_id: Uuid,
    owner_id: Uuid,
    title: String,
    description: String,
    cards: Json<Vec<Card>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CollectionRow {
    fn into_collection(self) -> Collection {
        Collection {
            collection_id: CollectionId::from_uuid(self.collection_id),
            owner_id: UserId::from_uuid(self.owner_id),
            title: self.title,
            description: self.description,
            cards: self.cards.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
