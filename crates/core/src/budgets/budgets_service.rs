use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use log::debug;

use crate::budgets::budgets_model::{Budget, BudgetInput};
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::{Error, Result};
use crate::utils::{month_key, parse_month, validate_id};

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetService {
    pub fn new(repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        BudgetService { repository }
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn list_budgets(&self, owner_id: &str, month: Option<String>) -> Result<Vec<Budget>> {
        let month = match month.filter(|m| !m.trim().is_empty()) {
            Some(month) => parse_month("month", &month)?,
            None => month_key(Local::now().date_naive()),
        };
        self.repository.list_for_month(owner_id, &month)
    }

    async fn set_budget(&self, owner_id: &str, input: BudgetInput) -> Result<Budget> {
        let budget = input.validate()?;
        debug!(
            "Setting {} budget for {} to {} cents",
            budget.category, budget.month, budget.limit_cents
        );
        self.repository.upsert(owner_id, budget).await
    }

    async fn delete_budget(&self, owner_id: &str, budget_id: &str) -> Result<()> {
        validate_id("id", budget_id)?;
        match self.repository.delete(owner_id, budget_id).await? {
            0 => Err(Error::NotFound(format!("Budget {budget_id}"))),
            _ => Ok(()),
        }
    }
}
