//! Database models for expenses.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};

use fintrack_core::expenses::{CategoryTotal, Expense, ExpenseUpdate};

use crate::errors::StorageError;
use crate::utils::parse_column;

/// Database model for expenses
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExpenseDB {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub category: String,
    pub amount_cents: i64,
    pub expense_date: NaiveDate,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Database model for inserting an expense
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::expenses)]
pub struct NewExpenseDB {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub category: String,
    pub amount_cents: i64,
    pub expense_date: NaiveDate,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Partial update; `None` columns are left out of the `SET` clause.
#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = crate::schema::expenses)]
pub struct ExpenseChangeset {
    pub title: Option<String>,
    pub category: Option<String>,
    pub amount_cents: Option<i64>,
    pub expense_date: Option<NaiveDate>,
    pub note: Option<Option<String>>,
}

impl From<ExpenseUpdate> for ExpenseChangeset {
    fn from(update: ExpenseUpdate) -> Self {
        Self {
            title: update.title,
            category: update.category.map(|c| c.as_str().to_string()),
            amount_cents: update.amount_cents,
            expense_date: update.date,
            note: update.note,
        }
    }
}

impl TryFrom<ExpenseDB> for Expense {
    type Error = StorageError;

    fn try_from(db: ExpenseDB) -> Result<Self, Self::Error> {
        Ok(Self {
            category: parse_column("category", &db.category)?,
            id: db.id,
            owner_id: db.owner_id,
            title: db.title,
            amount_cents: db.amount_cents,
            date: db.expense_date,
            note: db.note,
            created_at: db.created_at,
        })
    }
}

/// Row shape of the single-value spending total query.
#[derive(QueryableByName, Debug)]
pub struct SpendingTotalRow {
    #[diesel(sql_type = BigInt)]
    pub total_cents: i64,
}

/// Row shape of the per-category spending query.
#[derive(QueryableByName, Debug)]
pub struct CategoryTotalRow {
    #[diesel(sql_type = Text)]
    pub category: String,
    #[diesel(sql_type = BigInt)]
    pub total_cents: i64,
}

impl TryFrom<CategoryTotalRow> for CategoryTotal {
    type Error = StorageError;

    fn try_from(row: CategoryTotalRow) -> Result<Self, Self::Error> {
        Ok(Self {
            category: parse_column("category", &row.category)?,
            total_cents: row.total_cents,
        })
    }
}
