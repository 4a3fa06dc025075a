use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use log::debug;

use crate::budgets::BudgetRepositoryTrait;
use crate::dashboard::dashboard_model::{build_summary, DashboardSummary};
use crate::errors::Result;
use crate::expenses::ExpenseRepositoryTrait;
use crate::subscriptions::SubscriptionRepositoryTrait;
use crate::utils::{month_key, month_window};

#[async_trait]
pub trait DashboardServiceTrait: Send + Sync {
    /// Summary for the current calendar month in the server's local date.
    async fn get_summary(&self, owner_id: &str) -> Result<DashboardSummary>;
    /// Summary for the calendar month containing `today`.
    async fn get_summary_for(&self, owner_id: &str, today: NaiveDate)
        -> Result<DashboardSummary>;
}

pub struct DashboardService {
    expenses: Arc<dyn ExpenseRepositoryTrait>,
    budgets: Arc<dyn BudgetRepositoryTrait>,
    subscriptions: Arc<dyn SubscriptionRepositoryTrait>,
}

impl DashboardService {
    pub fn new(
        expenses: Arc<dyn ExpenseRepositoryTrait>,
        budgets: Arc<dyn BudgetRepositoryTrait>,
        subscriptions: Arc<dyn SubscriptionRepositoryTrait>,
    ) -> Self {
        Self {
            expenses,
            budgets,
            subscriptions,
        }
    }
}

/// Runs one synchronous repository read on the blocking pool.
async fn run_read<T, F>(read: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(read).await?
}

#[async_trait]
impl DashboardServiceTrait for DashboardService {
    async fn get_summary(&self, owner_id: &str) -> Result<DashboardSummary> {
        self.get_summary_for(owner_id, Local::now().date_naive()).await
    }

    async fn get_summary_for(
        &self,
        owner_id: &str,
        today: NaiveDate,
    ) -> Result<DashboardSummary> {
        let (start, end) = month_window(today);
        let month = month_key(today);
        debug!("Building dashboard for owner {owner_id}, window {start}..={end}");

        let total = {
            let repo = Arc::clone(&self.expenses);
            let owner = owner_id.to_string();
            run_read(move || repo.total_spending(&owner, start, end))
        };
        let by_category = {
            let repo = Arc::clone(&self.expenses);
            let owner = owner_id.to_string();
            run_read(move || repo.spending_by_category(&owner, start, end))
        };
        let budgets = {
            let repo = Arc::clone(&self.budgets);
            let owner = owner_id.to_string();
            let month = month.clone();
            run_read(move || repo.list_for_month(&owner, &month))
        };
        let renewals = {
            let repo = Arc::clone(&self.subscriptions);
            let owner = owner_id.to_string();
            run_read(move || repo.upcoming_renewals(&owner))
        };

        let (total, by_category, budgets, renewals) =
            futures::try_join!(total, by_category, budgets, renewals)?;

        Ok(build_summary(month, total, by_category, budgets, renewals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budgets::{Budget, NewBudget};
    use crate::categories::Category;
    use crate::dashboard::BudgetStatus;
    use crate::errors::{DatabaseError, Error};
    use crate::expenses::{CategoryTotal, Expense, ExpenseFilter, ExpenseUpdate, NewExpense};
    use crate::subscriptions::{BillingCycle, NewSubscription, Subscription, SubscriptionStatus};
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    fn at(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ============== Mock Repositories ==============

    /// Holds `(date, category, cents)` rows and records the windows it was asked for.
    #[derive(Default)]
    struct MockExpenses {
        rows: Vec<(NaiveDate, Category, i64)>,
        windows: Mutex<Vec<(NaiveDate, NaiveDate)>>,
        fail: bool,
    }

    #[async_trait]
    impl ExpenseRepositoryTrait for MockExpenses {
        async fn create(&self, _: &str, _: NewExpense) -> Result<Expense> {
            unimplemented!()
        }
        fn list(&self, _: &str, _: &ExpenseFilter) -> Result<Vec<Expense>> {
            unimplemented!()
        }
        fn get(&self, _: &str, _: &str) -> Result<Option<Expense>> {
            unimplemented!()
        }
        async fn update(&self, _: &str, _: &str, _: ExpenseUpdate) -> Result<Option<Expense>> {
            unimplemented!()
        }
        async fn delete(&self, _: &str, _: &str) -> Result<usize> {
            unimplemented!()
        }

        fn total_spending(&self, _: &str, start: NaiveDate, end: NaiveDate) -> Result<i64> {
            if self.fail {
                return Err(DatabaseError::QueryFailed("disk I/O error".into()).into());
            }
            self.windows.lock().unwrap().push((start, end));
            Ok(self
                .rows
                .iter()
                .filter(|(date, _, _)| *date >= start && *date <= end)
                .map(|(_, _, cents)| cents)
                .sum())
        }

        fn spending_by_category(
            &self,
            _: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<CategoryTotal>> {
            let mut totals: Vec<CategoryTotal> = Vec::new();
            for (date, category, cents) in &self.rows {
                if *date < start || *date > end {
                    continue;
                }
                match totals.iter_mut().find(|t| t.category == *category) {
                    Some(t) => t.total_cents += cents,
                    None => totals.push(CategoryTotal {
                        category: *category,
                        total_cents: *cents,
                    }),
                }
            }
            Ok(totals)
        }
    }

    struct MockBudgets {
        rows: Vec<Budget>,
        months: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BudgetRepositoryTrait for MockBudgets {
        fn list_for_month(&self, _: &str, month: &str) -> Result<Vec<Budget>> {
            self.months.lock().unwrap().push(month.to_string());
            Ok(self.rows.iter().filter(|b| b.month == month).cloned().collect())
        }
        async fn upsert(&self, _: &str, _: NewBudget) -> Result<Budget> {
            unimplemented!()
        }
        async fn delete(&self, _: &str, _: &str) -> Result<usize> {
            unimplemented!()
        }
    }

    struct MockSubscriptions {
        rows: Vec<Subscription>,
    }

    #[async_trait]
    impl SubscriptionRepositoryTrait for MockSubscriptions {
        fn list(&self, _: &str) -> Result<Vec<Subscription>> {
            unimplemented!()
        }
        async fn create(&self, _: &str, _: NewSubscription) -> Result<Subscription> {
            unimplemented!()
        }
        async fn update(
            &self,
            _: &str,
            _: &str,
            _: NewSubscription,
        ) -> Result<Option<Subscription>> {
            unimplemented!()
        }
        async fn delete(&self, _: &str, _: &str) -> Result<usize> {
            unimplemented!()
        }
        fn upcoming_renewals(&self, _: &str) -> Result<Vec<Subscription>> {
            Ok(self.rows.clone())
        }
    }

    fn food_budget(month: &str, limit_cents: i64) -> Budget {
        let ts = at(2024, 3, 1).and_hms_opt(0, 0, 0).unwrap();
        Budget {
            id: "b1".into(),
            owner_id: "owner".into(),
            category: Category::Food,
            month: month.into(),
            limit_cents,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn service(
        expenses: MockExpenses,
        budgets: Vec<Budget>,
    ) -> (DashboardService, Arc<MockExpenses>, Arc<MockBudgets>) {
        let expenses = Arc::new(expenses);
        let budgets = Arc::new(MockBudgets {
            rows: budgets,
            months: Mutex::new(Vec::new()),
        });
        let subscriptions = Arc::new(MockSubscriptions {
            rows: vec![Subscription {
                id: "s1".into(),
                owner_id: "owner".into(),
                title: "Netflix".into(),
                category: Category::Entertainment,
                amount_cents: 1549,
                billing_cycle: BillingCycle::Monthly,
                next_renewal_date: Some(at(2024, 3, 20)),
                status: SubscriptionStatus::Active,
                note: None,
                created_at: at(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap(),
            }],
        });
        (
            DashboardService::new(expenses.clone(), budgets.clone(), subscriptions),
            expenses,
            budgets,
        )
    }

    #[tokio::test]
    async fn summary_uses_whole_month_window() {
        let expenses = MockExpenses {
            rows: vec![
                (at(2024, 2, 29), Category::Food, 9900),
                (at(2024, 3, 1), Category::Food, 20000),
                (at(2024, 3, 31), Category::Food, 5000),
                (at(2024, 4, 1), Category::Food, 7700),
            ],
            ..Default::default()
        };
        let (service, expenses, budgets) = service(expenses, vec![food_budget("2024-03", 30000)]);

        let summary = service
            .get_summary_for("owner", at(2024, 3, 15))
            .await
            .unwrap();

        assert_eq!(
            *expenses.windows.lock().unwrap(),
            vec![(at(2024, 3, 1), at(2024, 3, 31))]
        );
        assert_eq!(*budgets.months.lock().unwrap(), vec!["2024-03".to_string()]);
        assert_eq!(summary.current_month, "2024-03");
        assert_eq!(summary.total_spending, dec!(250.00));
        assert_eq!(summary.budget_usage[0].percentage, 83);
        assert_eq!(summary.budget_usage[0].status, BudgetStatus::Good);
        assert_eq!(summary.upcoming_renewals.len(), 1);
    }

    #[tokio::test]
    async fn empty_month_reports_zero() {
        let (service, _, _) = service(MockExpenses::default(), vec![]);
        let summary = service
            .get_summary_for("owner", at(2024, 3, 15))
            .await
            .unwrap();
        assert_eq!(summary.total_spending, dec!(0));
        assert!(summary.category_spending.is_empty());
        assert!(summary.budget_usage.is_empty());
    }

    #[tokio::test]
    async fn any_failed_read_fails_the_summary() {
        let expenses = MockExpenses {
            fail: true,
            ..Default::default()
        };
        let (service, _, _) = service(expenses, vec![]);
        let err = service
            .get_summary_for("owner", at(2024, 3, 15))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::QueryFailed(_))));
    }
}
