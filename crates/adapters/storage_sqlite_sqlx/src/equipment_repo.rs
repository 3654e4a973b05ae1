//! Queries against the `equipment` table.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use lendstock_domain::equipment::Equipment;
use lendstock_domain::id::EquipmentId;

use crate::error::{StorageError, decode};

/// Wrapper for converting database rows into domain [`Equipment`].
struct Wrapper(Equipment);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let available_count: i64 = row.try_get("available_count")?;

        Ok(Self(Equipment {
            id: id.parse::<EquipmentId>().map_err(decode)?,
            name,
            available_count: u32::try_from(available_count).map_err(decode)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO equipment (id, name, available_count) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT id, name, available_count FROM equipment WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name, available_count FROM equipment ORDER BY name, id";
const UPDATE_COUNT: &str = "UPDATE equipment SET available_count = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM equipment WHERE id = ?";

pub(crate) async fn list(pool: &SqlitePool) -> Result<Vec<Equipment>, StorageError> {
    let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL).fetch_all(pool).await?;
    Ok(rows.into_iter().map(|w| w.0).collect())
}

pub(crate) async fn get(
    pool: &SqlitePool,
    id: EquipmentId,
) -> Result<Option<Equipment>, StorageError> {
    let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|w| w.0))
}

pub(crate) async fn insert(pool: &SqlitePool, equipment: &Equipment) -> Result<(), StorageError> {
    sqlx::query(INSERT)
        .bind(equipment.id.to_string())
        .bind(&equipment.name)
        .bind(i64::from(equipment.available_count))
        .execute(pool)
        .await?;
    Ok(())
}

/// Returns the number of rows touched.
pub(crate) async fn update_count(
    pool: &SqlitePool,
    id: EquipmentId,
    count: u32,
) -> Result<u64, StorageError> {
    let result = sqlx::query(UPDATE_COUNT)
        .bind(i64::from(count))
        .bind(id.to_string())
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Returns the number of rows touched.
pub(crate) async fn delete(pool: &SqlitePool, id: EquipmentId) -> Result<u64, StorageError> {
    let result = sqlx::query(DELETE_BY_ID)
        .bind(id.to_string())
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
