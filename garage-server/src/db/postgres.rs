//! PostgreSQL document store
//!
//! Each collection is a table `(id UUID, doc JSONB, created_at)`. Text search
//! compares the word arrays of the indexed fields against the search words
//! with `&&`, the expression the `*_text_idx` GIN index is built on.

use std::str::FromStr;

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{Collection, Document, DocumentStore, Filter, Sort, UpdateOutcome};
use crate::config::DatabaseConfig;
use crate::error::StoreResult;

/// Connection options for a non-memory database config
pub fn connect_options(config: &DatabaseConfig) -> StoreResult<PgConnectOptions> {
    let options = match config {
        DatabaseConfig::Url(url) => PgConnectOptions::from_str(url)?,
        DatabaseConfig::Credentials {
            host,
            port,
            user,
            password,
            database,
        } => PgConnectOptions::new()
            .host(host)
            .port(*port)
            .username(user)
            .password(password)
            .database(database),
        DatabaseConfig::Memory => {
            return Err(sqlx::Error::Configuration(
                "memory store has no connection options".into(),
            )
            .into());
        }
    };
    Ok(options)
}

/// Word array over a collection's text fields, matching the index expression
fn text_vector(collection: Collection) -> Option<String> {
    let fields = collection.text_fields();
    if fields.is_empty() {
        return None;
    }
    let concatenated = fields
        .iter()
        .map(|field| format!("coalesce(doc ->> '{field}', '')"))
        .collect::<Vec<_>>()
        .join(" || ' ' || ");
    Some(format!(r"regexp_split_to_array({concatenated}, '\W+')"))
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    doc: Json<Map<String, Value>>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            body: row.doc.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and apply embedded migrations
    pub async fn connect(options: PgConnectOptions, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        tracing::info!("Database connected");

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert_one(
        &self,
        collection: Collection,
        body: Map<String, Value>,
    ) -> StoreResult<Option<Uuid>> {
        let sql = format!(
            "INSERT INTO {} (id, doc) VALUES ($1, $2) RETURNING id",
            collection.name()
        );
        let row: Option<(Uuid,)> = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(Json(body))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id,)| id))
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        sort: Option<&Sort>,
    ) -> StoreResult<Vec<Document>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT id, doc FROM {}", collection.name()));

        match filter {
            Filter::All => {}
            Filter::Text(text) if text.is_empty() => return Ok(Vec::new()),
            Filter::Text(text) => match text_vector(collection) {
                Some(vector) => {
                    query
                        .push(format!(" WHERE {vector} && "))
                        .push_bind(text.words().to_vec())
                        .push("::text[]");
                }
                None => return Ok(Vec::new()),
            },
            Filter::FieldEquals { field, value } => {
                query
                    .push(" WHERE doc ->> ")
                    .push_bind(field.clone())
                    .push("::text = ")
                    .push_bind(value.clone());
            }
        }

        match sort {
            Some(sort) => {
                query
                    .push(" ORDER BY doc -> ")
                    .push_bind(sort.field.clone())
                    .push(format!("::text {}, created_at", sort.direction.as_sql()));
            }
            None => {
                query.push(" ORDER BY created_at");
            }
        }

        let rows: Vec<DocumentRow> = query.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn find_one(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Document>> {
        let sql = format!("SELECT id, doc FROM {} WHERE id = $1", collection.name());
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Document::from))
    }

    async fn set_field(
        &self,
        collection: Collection,
        id: Uuid,
        field: &str,
        value: Value,
    ) -> StoreResult<UpdateOutcome> {
        let table = collection.name();
        let sql = format!(
            r#"
            WITH updated AS (
                UPDATE {table}
                SET doc = jsonb_set(doc, ARRAY[$2::text], $3::jsonb, true)
                WHERE id = $1 AND (doc -> $2::text) IS DISTINCT FROM $3::jsonb
                RETURNING id
            )
            SELECT
                (SELECT COUNT(*) FROM {table} WHERE id = $1) AS matched,
                (SELECT COUNT(*) FROM updated) AS modified
            "#
        );
        let (matched, modified): (i64, i64) = sqlx::query_as(&sql)
            .bind(id)
            .bind(field)
            .bind(Json(value))
            .fetch_one(&self.pool)
            .await?;
        Ok(UpdateOutcome {
            matched: matched as u64,
            modified: modified as u64,
        })
    }

    async fn delete_one(&self, collection: Collection, id: Uuid) -> StoreResult<u64> {
        let sql = format!("DELETE FROM {} WHERE id = $1", collection.name());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn count(&self, collection: Collection) -> StoreResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", collection.name());
        let (count,): (i64,) = sqlx::query_as(&sql).fetch_one(&self.pool).await?;
        Ok(count as u64)
    }
}
