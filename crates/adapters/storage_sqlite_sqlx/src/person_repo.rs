//! Queries against the `person` table.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use lendstock_domain::id::PersonId;
use lendstock_domain::person::Person;

use crate::error::{StorageError, decode};

struct Wrapper(Person);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;

        Ok(Self(Person {
            id: id.parse::<PersonId>().map_err(decode)?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            is_lender: row.try_get("is_lender")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO person (id, name, email, is_lender) VALUES (?, ?, ?, ?)";
const SELECT_BY_NAME_EMAIL: &str =
    "SELECT id, name, email, is_lender FROM person WHERE name = ? AND email = ? LIMIT 1";
const SELECT_LENDERS: &str =
    "SELECT id, name, email, is_lender FROM person WHERE is_lender = 1 ORDER BY name, id";

pub(crate) async fn list_lenders(pool: &SqlitePool) -> Result<Vec<Person>, StorageError> {
    let rows: Vec<Wrapper> = sqlx::query_as(SELECT_LENDERS).fetch_all(pool).await?;
    Ok(rows.into_iter().map(|w| w.0).collect())
}

pub(crate) async fn find(
    pool: &SqlitePool,
    name: &str,
    email: &str,
) -> Result<Option<Person>, StorageError> {
    let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_NAME_EMAIL)
        .bind(name)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|w| w.0))
}

pub(crate) async fn insert(pool: &SqlitePool, person: &Person) -> Result<(), StorageError> {
    sqlx::query(INSERT)
        .bind(person.id.to_string())
        .bind(&person.name)
        .bind(person.email.as_deref())
        .bind(person.is_lender)
        .execute(pool)
        .await?;
    Ok(())
}
