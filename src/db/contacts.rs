//! Client and phone number operations against a caller-owned session.
//!
//! Every function takes `&mut PgConnection`; pass `&mut *tx` to run inside
//! a transaction. Nothing here begins, commits or rolls back, so a
//! multi-statement operation that fails midway leaves whatever the earlier
//! statements wrote until the caller rolls back.

use sqlx::PgConnection;
use tracing::{debug, info};

use crate::error::{ContactError, Result};
use crate::models::{Client, ClientCriteria, ClientId, ClientPatch, NewClient, PhoneId, PhoneNumber};

/// Create the `clients` and `phone_nums` tables if they are missing.
pub async fn create_schema(conn: &mut PgConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id SERIAL PRIMARY KEY,
            first_name VARCHAR(30) NOT NULL,
            last_name VARCHAR(30) NOT NULL,
            email VARCHAR(60) NOT NULL
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS phone_nums (
            id SERIAL PRIMARY KEY,
            phone_num VARCHAR(12) NOT NULL,
            client_id INTEGER NOT NULL REFERENCES clients(id)
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    info!("contact schema ready");
    Ok(())
}

/// Drop both tables, phone numbers first.
pub async fn drop_schema(conn: &mut PgConnection) -> Result<()> {
    sqlx::query("DROP TABLE IF EXISTS phone_nums")
        .execute(&mut *conn)
        .await?;
    sqlx::query("DROP TABLE IF EXISTS clients")
        .execute(&mut *conn)
        .await?;

    info!("contact schema dropped");
    Ok(())
}

/// Insert a client and its phone numbers, returning the new client id.
pub async fn add_client(conn: &mut PgConnection, client: &NewClient) -> Result<ClientId> {
    let id = sqlx::query_scalar::<_, ClientId>(
        r#"
        INSERT INTO clients (first_name, last_name, email)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(&client.first_name)
    .bind(&client.last_name)
    .bind(&client.email)
    .fetch_one(&mut *conn)
    .await?;

    insert_phones(conn, id, &client.phones).await?;

    debug!(client_id = id, phone_count = client.phones.len(), "client added");
    Ok(id)
}

/// Attach one phone number to an existing client.
pub async fn add_phone(conn: &mut PgConnection, client_id: ClientId, phone: &str) -> Result<PhoneId> {
    let id = sqlx::query_scalar::<_, PhoneId>(
        r#"
        INSERT INTO phone_nums (phone_num, client_id)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(phone)
    .bind(client_id)
    .fetch_one(&mut *conn)
    .await?;

    debug!(client_id, phone_id = id, "phone added");
    Ok(id)
}

pub async fn get_client(conn: &mut PgConnection, client_id: ClientId) -> Result<Option<Client>> {
    let client = sqlx::query_as::<_, Client>(
        "SELECT id, first_name, last_name, email FROM clients WHERE id = $1",
    )
    .bind(client_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(client)
}

/// Phone numbers owned by a client, in insertion order.
pub async fn list_phones(conn: &mut PgConnection, client_id: ClientId) -> Result<Vec<PhoneNumber>> {
    let phones = sqlx::query_as::<_, PhoneNumber>(
        r#"
        SELECT id, phone_num, client_id
        FROM phone_nums
        WHERE client_id = $1
        ORDER BY id ASC
        "#,
    )
    .bind(client_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(phones)
}

/// Apply a partial update and rewrite the client's phone set.
///
/// Unset fields are read from the current row first, and an unset phone
/// list re-reads the stored numbers. The client row is then overwritten and
/// every phone row replaced with the resolved list. The snapshot read locks
/// the row, so a concurrent update of the same client waits for this
/// transaction to finish before reading. Fails with
/// [`ContactError::NotFound`] when the client does not exist.
pub async fn update_client(
    conn: &mut PgConnection,
    client_id: ClientId,
    patch: ClientPatch,
) -> Result<Client> {
    let current = lock_client(conn, client_id)
        .await?
        .ok_or(ContactError::NotFound { client_id })?;
    let resolved = patch.apply_to(current);

    let phones = match patch.phones {
        Some(phones) => phones,
        None => list_phones(conn, client_id)
            .await?
            .into_iter()
            .map(|p| p.phone_num)
            .collect(),
    };

    let client = sqlx::query_as::<_, Client>(
        r#"
        UPDATE clients
        SET first_name = $1, last_name = $2, email = $3
        WHERE id = $4
        RETURNING id, first_name, last_name, email
        "#,
    )
    .bind(&resolved.first_name)
    .bind(&resolved.last_name)
    .bind(&resolved.email)
    .bind(client_id)
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM phone_nums WHERE client_id = $1")
        .bind(client_id)
        .execute(&mut *conn)
        .await?;

    insert_phones(conn, client_id, &phones).await?;

    debug!(client_id, phone_count = phones.len(), "client updated");
    Ok(client)
}

/// Remove a client's phone number. Returns how many rows went away.
pub async fn delete_phone(conn: &mut PgConnection, client_id: ClientId, phone: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM phone_nums WHERE client_id = $1 AND phone_num = $2")
        .bind(client_id)
        .bind(phone)
        .execute(&mut *conn)
        .await?;

    debug!(client_id, removed = result.rows_affected(), "phone deleted");
    Ok(result.rows_affected())
}

/// Remove a client together with its phone numbers.
///
/// Returns `false` if there was no such client.
pub async fn delete_client(conn: &mut PgConnection, client_id: ClientId) -> Result<bool> {
    // Phone rows reference the client, so they go first
    let phones = sqlx::query("DELETE FROM phone_nums WHERE client_id = $1")
        .bind(client_id)
        .execute(&mut *conn)
        .await?;

    let client = sqlx::query("DELETE FROM clients WHERE id = $1")
        .bind(client_id)
        .execute(&mut *conn)
        .await?;

    let deleted = client.rows_affected() > 0;
    debug!(client_id, phones_removed = phones.rows_affected(), deleted, "client deleted");
    Ok(deleted)
}

/// Look up the first client matching the criteria.
///
/// When several rows match, which one comes back is up to the store.
pub async fn find_client(conn: &mut PgConnection, criteria: &ClientCriteria) -> Result<Option<Client>> {
    let client = match criteria {
        ClientCriteria::ByEmail {
            email,
            first_name,
            last_name,
        } => {
            sqlx::query_as::<_, Client>(
                r#"
                SELECT id, first_name, last_name, email
                FROM clients
                WHERE email = $1
                AND ($2::varchar IS NULL OR first_name = $2)
                AND ($3::varchar IS NULL OR last_name = $3)
                LIMIT 1
                "#,
            )
            .bind(email)
            .bind(first_name.as_deref())
            .bind(last_name.as_deref())
            .fetch_optional(&mut *conn)
            .await?
        }
        ClientCriteria::ByPhone { phone } => {
            sqlx::query_as::<_, Client>(
                r#"
                SELECT c.id, c.first_name, c.last_name, c.email
                FROM phone_nums pn
                JOIN clients c ON c.id = pn.client_id
                WHERE pn.phone_num = $1
                LIMIT 1
                "#,
            )
            .bind(phone)
            .fetch_optional(&mut *conn)
            .await?
        }
    };

    debug!(?criteria, found = client.is_some(), "client lookup");
    Ok(client)
}

// Snapshot read for a read-then-write; the row lock holds until commit or rollback
async fn lock_client(conn: &mut PgConnection, client_id: ClientId) -> Result<Option<Client>> {
    let client = sqlx::query_as::<_, Client>(
        "SELECT id, first_name, last_name, email FROM clients WHERE id = $1 FOR UPDATE",
    )
    .bind(client_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(client)
}

async fn insert_phones(conn: &mut PgConnection, client_id: ClientId, phones: &[String]) -> Result<()> {
    for phone in phones {
        sqlx::query(
            r#"
            INSERT INTO phone_nums (phone_num, client_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(phone)
        .bind(client_id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
