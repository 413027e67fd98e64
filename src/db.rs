mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, types::Json, Executor, Pool, Postgres, Row};
use uuid::Uuid;

use crate::entities::{City, Entity, Place, User};
use crate::error::Error;

/// Persistence for entities, keyed by entity type and id.
///
/// Every call is durable on return. Nothing here retries; failures surface as
/// internal errors to the caller.
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    async fn get<T: Entity>(&self, id: Uuid) -> Result<Option<T>, Error>;

    /// Entities whose `field` holds `value`, in insertion order.
    async fn filter<T: Entity>(&self, field: &'static str, value: Uuid) -> Result<Vec<T>, Error>;

    /// Inserts or replaces the entity under its id.
    async fn save<T: Entity>(&self, entity: &T) -> Result<(), Error>;

    async fn delete<T: Entity>(&self, id: Uuid) -> Result<(), Error>;

    async fn count<T: Entity>(&self) -> Result<i64, Error>;
}

pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    #[tracing::instrument(name = "PgStore::new", skip(db_uri))]
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        // one JSONB row per entity, seq keeps insertion order
        for table in [City::TABLE, User::TABLE, Place::TABLE] {
            let sql = format!(
                "CREATE TABLE IF NOT EXISTS {} (seq BIGSERIAL, id UUID PRIMARY KEY, data JSONB NOT NULL)",
                table
            );
            pool.execute(sql.as_str()).await?;
        }

        Ok(Self { pool })
    }
}

#[async_trait]
impl Storage for PgStore {
    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn get<T: Entity>(&self, id: Uuid) -> Result<Option<T>, Error> {
        let sql = format!("SELECT data FROM {} WHERE id = $1", T::TABLE);

        let maybe_result = self
            .pool
            .fetch_optional(sqlx::query(&sql).bind(&id))
            .await?;

        match maybe_result {
            Some(result) => {
                let Json(entity): Json<T> = result.try_get("data")?;
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn filter<T: Entity>(&self, field: &'static str, value: Uuid) -> Result<Vec<T>, Error> {
        let sql = format!(
            "SELECT data FROM {} WHERE data->>$1 = $2 ORDER BY seq",
            T::TABLE
        );

        let results = self
            .pool
            .fetch_all(sqlx::query(&sql).bind(field).bind(value.to_string()))
            .await?;

        let mut entities = Vec::with_capacity(results.len());
        for result in results {
            let Json(entity): Json<T> = result.try_get("data")?;
            entities.push(entity);
        }

        Ok(entities)
    }

    #[tracing::instrument(skip(self, entity), fields(table = T::TABLE, id = %entity.id()))]
    async fn save<T: Entity>(&self, entity: &T) -> Result<(), Error> {
        let sql = format!(
            "INSERT INTO {} (id, data) VALUES ($1, $2) ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data",
            T::TABLE
        );

        self.pool
            .execute(sqlx::query(&sql).bind(entity.id()).bind(Json(entity)))
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn delete<T: Entity>(&self, id: Uuid) -> Result<(), Error> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);

        self.pool.execute(sqlx::query(&sql).bind(&id)).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn count<T: Entity>(&self) -> Result<i64, Error> {
        let sql = format!("SELECT COUNT(*) AS count FROM {}", T::TABLE);

        let count: i64 = self
            .pool
            .fetch_one(sqlx::query(&sql))
            .await?
            .try_get("count")?;

        Ok(count)
    }
}
