use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use uuid::Uuid;

use fintrack_core::budgets::{Budget, BudgetRepositoryTrait, NewBudget};
use fintrack_core::Result;

use super::model::{BudgetDB, NewBudgetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::budgets;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn list_for_month(&self, owner: &str, month: &str) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table
            .filter(budgets::owner_id.eq(owner))
            .filter(budgets::budget_month.eq(month))
            .order_by(budgets::category.asc())
            .select(BudgetDB::as_select())
            .load::<BudgetDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(|row| Budget::try_from(row).map_err(Into::into))
            .collect()
    }

    async fn upsert(&self, owner: &str, budget: NewBudget) -> Result<Budget> {
        let now = Utc::now().naive_utc();
        let row = NewBudgetDB {
            id: Uuid::new_v4().to_string(),
            owner_id: owner.to_string(),
            category: budget.category.as_str().to_string(),
            budget_month: budget.month,
            monthly_limit_cents: budget.limit_cents,
            created_at: now,
            updated_at: now,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let saved = diesel::insert_into(budgets::table)
                    .values(&row)
                    .on_conflict((budgets::owner_id, budgets::category, budgets::budget_month))
                    .do_update()
                    .set((
                        budgets::monthly_limit_cents.eq(excluded(budgets::monthly_limit_cents)),
                        budgets::updated_at.eq(excluded(budgets::updated_at)),
                    ))
                    .returning(BudgetDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Budget::try_from(saved)?)
            })
            .await
    }

    async fn delete(&self, owner: &str, budget_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let budget_id = budget_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    budgets::table
                        .filter(budgets::id.eq(budget_id))
                        .filter(budgets::owner_id.eq(owner)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
