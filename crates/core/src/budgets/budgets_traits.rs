use async_trait::async_trait;

use crate::budgets::budgets_model::{Budget, BudgetInput, NewBudget};
use crate::errors::Result;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Budgets for the owner in one `YYYY-MM` month, ordered by category.
    fn list_for_month(&self, owner_id: &str, month: &str) -> Result<Vec<Budget>>;
    /// Inserts or replaces the limit for `(owner, category, month)`.
    async fn upsert(&self, owner_id: &str, budget: NewBudget) -> Result<Budget>;
    async fn delete(&self, owner_id: &str, budget_id: &str) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    /// Lists budgets for `month`, or for the current month when `None`.
    fn list_budgets(&self, owner_id: &str, month: Option<String>) -> Result<Vec<Budget>>;
    async fn set_budget(&self, owner_id: &str, input: BudgetInput) -> Result<Budget>;
    async fn delete_budget(&self, owner_id: &str, budget_id: &str) -> Result<()>;
}
