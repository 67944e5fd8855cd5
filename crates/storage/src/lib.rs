use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;
use uuid::Uuid;

use shared::domain::{Address, AddressId};

const SELECT_ADDRESS_COLUMNS: &str = "SELECT id, first_name, last_name, spouse, email_address,
        street_1, street_2, city, state, zip, country, home_phone, mobile_phone,
        relationship, title, children, label_name, send_christmas_card
     FROM addresses";

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// All addresses in insertion order.
    pub async fn list_addresses(&self) -> Result<Vec<Address>> {
        let rows = sqlx::query(&format!("{SELECT_ADDRESS_COLUMNS} ORDER BY seq"))
            .fetch_all(&self.pool)
            .await
            .context("failed to list addresses")?;
        rows.iter().map(address_from_row).collect()
    }

    pub async fn list_christmas_card_addresses(&self) -> Result<Vec<Address>> {
        let rows = sqlx::query(&format!(
            "{SELECT_ADDRESS_COLUMNS} WHERE send_christmas_card = 1 ORDER BY seq"
        ))
        .fetch_all(&self.pool)
        .await
        .context("failed to list christmas card addresses")?;
        rows.iter().map(address_from_row).collect()
    }

    /// Inserts a new row and returns the freshly minted identifier. Any id
    /// carried by `address` is ignored.
    pub async fn create_address(&self, address: &Address) -> Result<AddressId> {
        let id = AddressId(Uuid::new_v4().to_string());
        sqlx::query(
            "INSERT INTO addresses (id, first_name, last_name, spouse, email_address,
                street_1, street_2, city, state, zip, country, home_phone, mobile_phone,
                relationship, title, children, label_name, send_christmas_card)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.as_str())
        .bind(&address.first_name)
        .bind(&address.last_name)
        .bind(&address.spouse)
        .bind(&address.email_address)
        .bind(&address.street_1)
        .bind(&address.street_2)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zip)
        .bind(&address.country)
        .bind(&address.home_phone)
        .bind(&address.mobile_phone)
        .bind(&address.relationship)
        .bind(&address.title)
        .bind(&address.children)
        .bind(&address.label_name)
        .bind(address.send_christmas_card)
        .execute(&self.pool)
        .await
        .context("failed to insert address")?;
        debug!(address_id = %id, "inserted address");
        Ok(id)
    }

    /// Overwrites every field of the stored row. Returns `false` when no row
    /// has the given id.
    pub async fn update_address(&self, id: &AddressId, address: &Address) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE addresses SET first_name = ?, last_name = ?, spouse = ?, email_address = ?,
                street_1 = ?, street_2 = ?, city = ?, state = ?, zip = ?, country = ?,
                home_phone = ?, mobile_phone = ?, relationship = ?, title = ?, children = ?,
                label_name = ?, send_christmas_card = ?
             WHERE id = ?",
        )
        .bind(&address.first_name)
        .bind(&address.last_name)
        .bind(&address.spouse)
        .bind(&address.email_address)
        .bind(&address.street_1)
        .bind(&address.street_2)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zip)
        .bind(&address.country)
        .bind(&address.home_phone)
        .bind(&address.mobile_phone)
        .bind(&address.relationship)
        .bind(&address.title)
        .bind(&address.children)
        .bind(&address.label_name)
        .bind(address.send_christmas_card)
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to update address {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_address(&self, id: &AddressId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete address {id}"))?;
        Ok(result.rows_affected() > 0)
    }
}

fn address_from_row(row: &SqliteRow) -> Result<Address> {
    Ok(Address {
        id: Some(AddressId(row.try_get("id")?)),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        spouse: row.try_get("spouse")?,
        email_address: row.try_get("email_address")?,
        street_1: row.try_get("street_1")?,
        street_2: row.try_get("street_2")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        zip: row.try_get("zip")?,
        country: row.try_get("country")?,
        home_phone: row.try_get("home_phone")?,
        mobile_phone: row.try_get("mobile_phone")?,
        relationship: row.try_get("relationship")?,
        title: row.try_get("title")?,
        children: row.try_get("children")?,
        label_name: row.try_get("label_name")?,
        send_christmas_card: row.try_get("send_christmas_card")?,
    })
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
