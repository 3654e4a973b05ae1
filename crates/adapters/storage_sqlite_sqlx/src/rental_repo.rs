//! Queries against the `rental` table, including the joined listing.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use lendstock_domain::equipment::EquipmentSummary;
use lendstock_domain::id::{EquipmentId, PersonId, RentalId};
use lendstock_domain::person::Person;
use lendstock_domain::rental::{Rental, RentalDetails};
use lendstock_domain::time::{format_date, parse_date};

use crate::error::{StorageError, decode};

fn rental_from_row(row: &SqliteRow) -> Result<Rental, sqlx::Error> {
    let id: String = row.try_get("id")?;
    let equipment_id: String = row.try_get("equipment_id")?;
    let lender_id: String = row.try_get("lender_id")?;
    let borrower_id: String = row.try_get("borrower_id")?;
    let start_date: String = row.try_get("start_date")?;
    let end_date: String = row.try_get("end_date")?;

    Ok(Rental {
        id: id.parse::<RentalId>().map_err(decode)?,
        equipment_id: equipment_id.parse::<EquipmentId>().map_err(decode)?,
        lender_id: lender_id.parse::<PersonId>().map_err(decode)?,
        borrower_id: borrower_id.parse::<PersonId>().map_err(decode)?,
        start_date: parse_date("start_date", &start_date).map_err(decode)?,
        end_date: parse_date("end_date", &end_date).map_err(decode)?,
    })
}

/// Person joined under the column prefix `prefix`, absent when the join missed.
fn joined_person(row: &SqliteRow, prefix: &str) -> Result<Option<Person>, sqlx::Error> {
    let id: Option<String> = row.try_get(format!("{prefix}_id_ref").as_str())?;
    let Some(id) = id else {
        return Ok(None);
    };
    Ok(Some(Person {
        id: id.parse::<PersonId>().map_err(decode)?,
        name: row.try_get(format!("{prefix}_name").as_str())?,
        email: row.try_get(format!("{prefix}_email").as_str())?,
        is_lender: row.try_get(format!("{prefix}_is_lender").as_str())?,
    }))
}

fn joined_equipment(row: &SqliteRow) -> Result<Option<EquipmentSummary>, sqlx::Error> {
    let id: Option<String> = row.try_get("equipment_id_ref")?;
    let Some(id) = id else {
        return Ok(None);
    };
    Ok(Some(EquipmentSummary {
        id: id.parse::<EquipmentId>().map_err(decode)?,
        name: row.try_get("equipment_name")?,
    }))
}

struct Wrapper(Rental);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        rental_from_row(row).map(Self)
    }
}

struct DetailsWrapper(RentalDetails);

impl<'r> FromRow<'r, SqliteRow> for DetailsWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(RentalDetails {
            rental: rental_from_row(row)?,
            borrower: joined_person(row, "borrower")?,
            lender: joined_person(row, "lender")?,
            equipment: joined_equipment(row)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO rental (id, equipment_id, lender_id, borrower_id, start_date, end_date) VALUES (?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT id, equipment_id, lender_id, borrower_id, start_date, end_date FROM rental WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM rental WHERE id = ?";
const SELECT_ALL_JOINED: &str = "\
SELECT r.id, r.equipment_id, r.lender_id, r.borrower_id, r.start_date, r.end_date,
       b.id AS borrower_id_ref, b.name AS borrower_name, b.email AS borrower_email, b.is_lender AS borrower_is_lender,
       l.id AS lender_id_ref, l.name AS lender_name, l.email AS lender_email, l.is_lender AS lender_is_lender,
       e.id AS equipment_id_ref, e.name AS equipment_name
FROM rental r
LEFT JOIN person b ON b.id = r.borrower_id
LEFT JOIN person l ON l.id = r.lender_id
LEFT JOIN equipment e ON e.id = r.equipment_id
ORDER BY r.start_date, r.id";

pub(crate) async fn get(pool: &SqlitePool, id: RentalId) -> Result<Option<Rental>, StorageError> {
    let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|w| w.0))
}

pub(crate) async fn insert(pool: &SqlitePool, rental: &Rental) -> Result<(), StorageError> {
    sqlx::query(INSERT)
        .bind(rental.id.to_string())
        .bind(rental.equipment_id.to_string())
        .bind(rental.lender_id.to_string())
        .bind(rental.borrower_id.to_string())
        .bind(format_date(rental.start_date))
        .bind(format_date(rental.end_date))
        .execute(pool)
        .await?;
    Ok(())
}

/// Returns the number of rows touched.
pub(crate) async fn delete(pool: &SqlitePool, id: RentalId) -> Result<u64, StorageError> {
    let result = sqlx::query(DELETE_BY_ID)
        .bind(id.to_string())
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn list_joined(pool: &SqlitePool) -> Result<Vec<RentalDetails>, StorageError> {
    let rows: Vec<DetailsWrapper> = sqlx::query_as(SELECT_ALL_JOINED).fetch_all(pool).await?;
    Ok(rows.into_iter().map(|w| w.0).collect())
}
