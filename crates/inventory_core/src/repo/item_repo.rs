//! Item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `items` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Item::validate()` before SQL mutations.
//! - Duplicate ids on insert surface as `RepoError::DuplicateId`.
//! - `list_items` returns rows ordered by ascending id.

use crate::db::DbError;
use crate::model::item::{Item, ItemId, ItemValidationError};
use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    name,
    price,
    quantity
FROM items";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for item persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ItemValidationError),
    Db(DbError),
    DuplicateId(ItemId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "item already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted item data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateId(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for item CRUD operations.
pub trait ItemRepository {
    fn insert_item(&self, item: &Item) -> RepoResult<()>;
    /// Overwrites every field of the row with `item.id`. Returns `false` when
    /// no such row exists.
    fn update_item(&self, item: &Item) -> RepoResult<bool>;
    /// Removes the row with `id`. Returns `false` when no such row exists.
    fn delete_item(&self, id: ItemId) -> RepoResult<bool>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    fn list_items(&self) -> RepoResult<Vec<Item>>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn insert_item(&self, item: &Item) -> RepoResult<()> {
        item.validate()?;

        self.conn
            .execute(
                "INSERT INTO items (
                    id,
                    name,
                    price,
                    quantity
                ) VALUES (?1, ?2, ?3, ?4);",
                params![item.id, item.name.as_str(), item.price, item.quantity],
            )
            .map_err(|err| {
                if is_key_conflict(&err) {
                    RepoError::DuplicateId(item.id)
                } else {
                    RepoError::from(err)
                }
            })?;

        Ok(())
    }

    fn update_item(&self, item: &Item) -> RepoResult<bool> {
        item.validate()?;

        let changed = self.conn.execute(
            "UPDATE items
             SET
                name = ?1,
                price = ?2,
                quantity = ?3
             WHERE id = ?4;",
            params![item.name.as_str(), item.price, item.quantity, item.id],
        )?;

        Ok(changed > 0)
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;
        let item = stmt.query_row([id], read_item_row).optional()?;
        item.map(check_item).transpose()
    }

    fn list_items(&self) -> RepoResult<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{ITEM_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(check_item(read_item_row(row)?)?);
        }

        Ok(items)
    }
}

fn read_item_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get("id")?,
        name: row.get("name")?,
        price: row.get("price")?,
        quantity: row.get("quantity")?,
    })
}

fn check_item(item: Item) -> RepoResult<Item> {
    if !item.price.is_finite() {
        return Err(RepoError::InvalidData(format!(
            "non-finite price `{}` in items.price for id {}",
            item.price, item.id
        )));
    }
    Ok(item)
}

fn is_key_conflict(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => {
            failure.code == ErrorCode::ConstraintViolation
                && matches!(
                    failure.extended_code,
                    ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE
                )
        }
        _ => false,
    }
}
