//! Database models for budgets.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use fintrack_core::budgets::Budget;

use crate::errors::StorageError;
use crate::utils::parse_column;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub owner_id: String,
    pub category: String,
    pub budget_month: String,
    pub monthly_limit_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
pub struct NewBudgetDB {
    pub id: String,
    pub owner_id: String,
    pub category: String,
    pub budget_month: String,
    pub monthly_limit_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BudgetDB> for Budget {
    type Error = StorageError;

    fn try_from(db: BudgetDB) -> Result<Self, Self::Error> {
        Ok(Self {
            category: parse_column("category", &db.category)?,
            id: db.id,
            owner_id: db.owner_id,
            month: db.budget_month,
            limit_cents: db.monthly_limit_cents,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
