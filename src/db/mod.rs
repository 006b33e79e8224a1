pub mod contacts;

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::models::{Client, ClientCriteria, ClientId, ClientPatch, NewClient, PhoneId, PhoneNumber};

/// Database connection pool
///
/// Each method runs one operation from [`contacts`] in its own transaction
/// and commits it. Use [`Database::begin`] and the functions in
/// [`contacts`] directly to group several operations.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(config.database_url())
            .await?;

        info!(max_connections = config.database_max_connections, "database pool ready");
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Start a transaction; dropping it without commit rolls back
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    pub async fn create_schema(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        contacts::create_schema(&mut tx).await?;
        tx.commit().await?;

        Ok(())
    }

    // Client operations
    pub async fn add_client(&self, client: &NewClient) -> Result<ClientId> {
        let mut tx = self.pool.begin().await?;
        let id = contacts::add_client(&mut tx, client).await?;
        tx.commit().await?;

        Ok(id)
    }

    pub async fn get_client(&self, client_id: ClientId) -> Result<Option<Client>> {
        let mut conn = self.pool.acquire().await?;
        contacts::get_client(&mut conn, client_id).await
    }

    /// Read-then-write partial update in one transaction. Concurrent updates
    /// of the same client are serialized by the row lock on the snapshot read.
    pub async fn update_client(&self, client_id: ClientId, patch: ClientPatch) -> Result<Client> {
        let mut tx = self.pool.begin().await?;
        let client = contacts::update_client(&mut tx, client_id, patch).await?;
        tx.commit().await?;

        Ok(client)
    }

    pub async fn delete_client(&self, client_id: ClientId) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let deleted = contacts::delete_client(&mut tx, client_id).await?;
        tx.commit().await?;

        Ok(deleted)
    }

    pub async fn find_client(&self, criteria: &ClientCriteria) -> Result<Option<Client>> {
        let mut conn = self.pool.acquire().await?;
        contacts::find_client(&mut conn, criteria).await
    }

    // Phone operations
    pub async fn add_phone(&self, client_id: ClientId, phone: &str) -> Result<PhoneId> {
        let mut tx = self.pool.begin().await?;
        let id = contacts::add_phone(&mut tx, client_id, phone).await?;
        tx.commit().await?;

        Ok(id)
    }

    pub async fn list_phones(&self, client_id: ClientId) -> Result<Vec<PhoneNumber>> {
        let mut conn = self.pool.acquire().await?;
        contacts::list_phones(&mut conn, client_id).await
    }

    pub async fn delete_phone(&self, client_id: ClientId, phone: &str) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let removed = contacts::delete_phone(&mut tx, client_id, phone).await?;
        tx.commit().await?;

        Ok(removed)
    }
}

/// Initialize the database connection pool and make sure the schema exists
pub async fn init(config: &Config) -> Result<Database> {
    let db = Database::new(config).await?;
    db.create_schema().await?;

    Ok(db)
}
