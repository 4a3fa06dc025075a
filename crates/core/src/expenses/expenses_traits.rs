use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::expenses::expenses_model::{
    CategoryTotal, Expense, ExpenseFilter, ExpenseInput, ExpenseListQuery, ExpensePage,
    ExpenseUpdate, NewExpense,
};

/// Trait for expense repository operations. Every call is scoped to one owner.
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    async fn create(&self, owner_id: &str, new_expense: NewExpense) -> Result<Expense>;
    fn list(&self, owner_id: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>>;
    fn get(&self, owner_id: &str, expense_id: &str) -> Result<Option<Expense>>;
    async fn update(
        &self,
        owner_id: &str,
        expense_id: &str,
        update: ExpenseUpdate,
    ) -> Result<Option<Expense>>;
    async fn delete(&self, owner_id: &str, expense_id: &str) -> Result<usize>;

    /// Sum of amounts dated within `[start, end]`.
    fn total_spending(&self, owner_id: &str, start: NaiveDate, end: NaiveDate) -> Result<i64>;
    /// Per-category sums within `[start, end]`, largest first.
    fn spending_by_category(
        &self,
        owner_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CategoryTotal>>;
}

/// Trait for expense service operations
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    async fn create_expense(&self, owner_id: &str, input: ExpenseInput) -> Result<Expense>;
    fn list_expenses(&self, owner_id: &str, query: ExpenseListQuery) -> Result<ExpensePage>;
    fn get_expense(&self, owner_id: &str, expense_id: &str) -> Result<Expense>;
    async fn update_expense(
        &self,
        owner_id: &str,
        expense_id: &str,
        input: ExpenseInput,
    ) -> Result<Expense>;
    async fn delete_expense(&self, owner_id: &str, expense_id: &str) -> Result<()>;
}
