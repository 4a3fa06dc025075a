use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::errors::{Error, Result};
use crate::expenses::expenses_model::{
    Expense, ExpenseCursor, ExpenseInput, ExpenseListQuery, ExpensePage,
};
use crate::expenses::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::utils::validate_id;

pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
}

impl ExpenseService {
    pub fn new(repository: Arc<dyn ExpenseRepositoryTrait>) -> Self {
        ExpenseService { repository }
    }
}

fn not_found(expense_id: &str) -> Error {
    Error::NotFound(format!("Expense {expense_id}"))
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    async fn create_expense(&self, owner_id: &str, input: ExpenseInput) -> Result<Expense> {
        let new_expense = input.into_new_expense()?;
        self.repository.create(owner_id, new_expense).await
    }

    fn list_expenses(&self, owner_id: &str, query: ExpenseListQuery) -> Result<ExpensePage> {
        let filter = query.into_filter()?;
        let items = self.repository.list(owner_id, &filter)?;
        debug!(
            "Listed {} expenses (limit {}) for owner {}",
            items.len(),
            filter.limit,
            owner_id
        );
        let next_cursor = if items.len() as i64 == filter.limit {
            items.last().map(ExpenseCursor::after)
        } else {
            None
        };
        Ok(ExpensePage { items, next_cursor })
    }

    fn get_expense(&self, owner_id: &str, expense_id: &str) -> Result<Expense> {
        validate_id("id", expense_id)?;
        self.repository
            .get(owner_id, expense_id)?
            .ok_or_else(|| not_found(expense_id))
    }

    async fn update_expense(
        &self,
        owner_id: &str,
        expense_id: &str,
        input: ExpenseInput,
    ) -> Result<Expense> {
        validate_id("id", expense_id)?;
        let update = input.into_update()?;
        if update.is_empty() {
            return self.get_expense(owner_id, expense_id);
        }
        self.repository
            .update(owner_id, expense_id, update)
            .await?
            .ok_or_else(|| not_found(expense_id))
    }

    async fn delete_expense(&self, owner_id: &str, expense_id: &str) -> Result<()> {
        validate_id("id", expense_id)?;
        match self.repository.delete(owner_id, expense_id).await? {
            0 => Err(not_found(expense_id)),
            _ => Ok(()),
        }
    }
}
