//! Dashboard response shapes and the pure aggregation over already-fetched rows.

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::budgets::Budget;
use crate::categories::Category;
use crate::constants::BUDGET_WARNING_TENTHS;
use crate::expenses::CategoryTotal;
use crate::subscriptions::{BillingCycle, Subscription, SubscriptionStatus};
use crate::utils::cents_to_dollars;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Good,
    Warning,
    Over,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category: Category,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUsage {
    pub category: Category,
    pub limit: Decimal,
    pub spent: Decimal,
    pub percentage: i64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingRenewal {
    pub id: String,
    pub title: String,
    pub amount: Decimal,
    pub renewal_date: NaiveDate,
    pub billing_cycle: BillingCycle,
    pub status: SubscriptionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_spending: Decimal,
    pub category_spending: Vec<CategorySpending>,
    pub budget_usage: Vec<BudgetUsage>,
    pub upcoming_renewals: Vec<UpcomingRenewal>,
    pub current_month: String,
}

/// Usage percentage (rounded half up) and status of `spent_cents` against `limit_cents`.
///
/// Integer arithmetic keeps the 90% boundary exact: with a 300.00 limit,
/// 270.00 is still `Good` and 270.01 is `Warning`.
pub fn classify_budget(spent_cents: i64, limit_cents: i64) -> (i64, BudgetStatus) {
    let spent = i128::from(spent_cents);
    let limit = i128::from(limit_cents);

    let percentage = if limit > 0 {
        let rounded = (spent * 200 + limit) / (2 * limit);
        i64::try_from(rounded).unwrap_or(i64::MAX)
    } else {
        0
    };

    let status = if spent > limit {
        BudgetStatus::Over
    } else if spent * 10 > limit * i128::from(BUDGET_WARNING_TENTHS) {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Good
    };

    (percentage, status)
}

/// Joins the four independent reads into one summary.
///
/// The reported total always equals the sum of the category breakdown.
pub fn build_summary(
    current_month: String,
    total_cents: i64,
    mut by_category: Vec<CategoryTotal>,
    budgets: Vec<Budget>,
    renewals: Vec<Subscription>,
) -> DashboardSummary {
    by_category.sort_by(|a, b| {
        b.total_cents
            .cmp(&a.total_cents)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });

    let breakdown_cents: i64 = by_category.iter().map(|c| c.total_cents).sum();
    if breakdown_cents != total_cents {
        warn!(
            "Dashboard total ({total_cents}) differs from category breakdown ({breakdown_cents}) \
             for {current_month}; reporting the breakdown sum"
        );
    }

    let spent_in = |category: Category| {
        by_category
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.total_cents)
    };

    let budget_usage = budgets
        .iter()
        .map(|budget| {
            let spent_cents = spent_in(budget.category);
            let (percentage, status) = classify_budget(spent_cents, budget.limit_cents);
            BudgetUsage {
                category: budget.category,
                limit: cents_to_dollars(budget.limit_cents),
                spent: cents_to_dollars(spent_cents),
                percentage,
                status,
            }
        })
        .collect();

    let mut upcoming_renewals: Vec<UpcomingRenewal> = renewals
        .into_iter()
        .filter(|s| s.status.is_billable())
        .filter_map(|s| {
            s.next_renewal_date.map(|renewal_date| UpcomingRenewal {
                id: s.id,
                title: s.title,
                amount: cents_to_dollars(s.amount_cents),
                renewal_date,
                billing_cycle: s.billing_cycle,
                status: s.status,
            })
        })
        .collect();
    upcoming_renewals.sort_by_key(|r| r.renewal_date);

    DashboardSummary {
        total_spending: cents_to_dollars(breakdown_cents),
        category_spending: by_category
            .iter()
            .map(|c| CategorySpending {
                category: c.category,
                amount: cents_to_dollars(c.total_cents),
            })
            .collect(),
        budget_usage,
        upcoming_renewals,
        current_month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn budget(category: Category, limit_cents: i64) -> Budget {
        let now = at(2024, 3, 1).and_hms_opt(0, 0, 0).unwrap();
        Budget {
            id: format!("budget-{category}"),
            owner_id: "owner".into(),
            category,
            month: "2024-03".into(),
            limit_cents,
            created_at: now,
            updated_at: now,
        }
    }

    fn subscription(
        title: &str,
        renewal: Option<NaiveDate>,
        status: SubscriptionStatus,
    ) -> Subscription {
        Subscription {
            id: format!("sub-{title}"),
            owner_id: "owner".into(),
            title: title.into(),
            category: Category::Entertainment,
            amount_cents: 1549,
            billing_cycle: BillingCycle::Monthly,
            next_renewal_date: renewal,
            status,
            note: None,
            created_at: at(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(classify_budget(25000, 30000), (83, BudgetStatus::Good));
        assert_eq!(classify_budget(27000, 30000), (90, BudgetStatus::Good));
        assert_eq!(classify_budget(27001, 30000), (90, BudgetStatus::Warning));
        assert_eq!(classify_budget(27100, 30000), (90, BudgetStatus::Warning));
        assert_eq!(classify_budget(30000, 30000), (100, BudgetStatus::Warning));
        assert_eq!(classify_budget(30100, 30000), (100, BudgetStatus::Over));
        assert_eq!(classify_budget(0, 30000), (0, BudgetStatus::Good));
    }

    #[test]
    fn percentage_rounds_half_up() {
        // 1/8 = 12.5%
        assert_eq!(classify_budget(100, 800).0, 13);
        // 1/3 = 33.3%
        assert_eq!(classify_budget(100, 300).0, 33);
    }

    #[test]
    fn zero_limit_has_zero_percentage() {
        assert_eq!(classify_budget(0, 0), (0, BudgetStatus::Good));
        assert_eq!(classify_budget(500, 0), (0, BudgetStatus::Over));
    }

    #[test]
    fn summary_joins_budgets_with_category_spend() {
        let summary = build_summary(
            "2024-03".into(),
            32500,
            vec![
                CategoryTotal {
                    category: Category::Food,
                    total_cents: 25000,
                },
                CategoryTotal {
                    category: Category::Entertainment,
                    total_cents: 7500,
                },
            ],
            vec![
                budget(Category::Food, 30000),
                budget(Category::Housing, 120000),
            ],
            vec![],
        );

        assert_eq!(summary.total_spending, dec!(325.00));
        assert_eq!(summary.category_spending.len(), 2);
        assert_eq!(summary.category_spending[0].category, Category::Food);

        assert_eq!(summary.budget_usage.len(), 2);
        let food = &summary.budget_usage[0];
        assert_eq!(food.limit, dec!(300.00));
        assert_eq!(food.spent, dec!(250.00));
        assert_eq!(food.percentage, 83);
        assert_eq!(food.status, BudgetStatus::Good);

        let housing = &summary.budget_usage[1];
        assert_eq!(housing.spent, Decimal::ZERO);
        assert_eq!(housing.percentage, 0);
    }

    #[test]
    fn categories_without_budget_are_not_in_usage() {
        let summary = build_summary(
            "2024-03".into(),
            1000,
            vec![CategoryTotal {
                category: Category::Other,
                total_cents: 1000,
            }],
            vec![],
            vec![],
        );
        assert!(summary.budget_usage.is_empty());
        assert_eq!(summary.category_spending.len(), 1);
    }

    #[test]
    fn breakdown_ties_break_by_name() {
        let summary = build_summary(
            "2024-03".into(),
            2000,
            vec![
                CategoryTotal {
                    category: Category::Utilities,
                    total_cents: 1000,
                },
                CategoryTotal {
                    category: Category::Food,
                    total_cents: 1000,
                },
            ],
            vec![],
            vec![],
        );
        let names: Vec<_> = summary
            .category_spending
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(names, ["Food", "Utilities"]);
    }

    #[test]
    fn total_follows_breakdown_when_reads_disagree() {
        let summary = build_summary(
            "2024-03".into(),
            9999,
            vec![CategoryTotal {
                category: Category::Food,
                total_cents: 1200,
            }],
            vec![],
            vec![],
        );
        let breakdown: Decimal = summary.category_spending.iter().map(|c| c.amount).sum();
        assert_eq!(summary.total_spending, breakdown);
    }

    #[test]
    fn renewals_skip_canceled_and_undated_and_sort_ascending() {
        let summary = build_summary(
            "2024-03".into(),
            0,
            vec![],
            vec![],
            vec![
                subscription("Later", Some(at(2024, 3, 25)), SubscriptionStatus::Active),
                subscription("Sooner", Some(at(2024, 3, 20)), SubscriptionStatus::Trial),
                subscription("Gone", Some(at(2024, 3, 1)), SubscriptionStatus::Canceled),
                subscription("OneOff", None, SubscriptionStatus::Active),
                subscription("PastDue", Some(at(2024, 2, 2)), SubscriptionStatus::Active),
            ],
        );

        let titles: Vec<_> = summary
            .upcoming_renewals
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, ["PastDue", "Sooner", "Later"]);
        assert_eq!(summary.upcoming_renewals[1].amount, dec!(15.49));
    }

    #[test]
    fn serialises_with_camel_case_keys() {
        let summary = build_summary(
            "2024-03".into(),
            25000,
            vec![CategoryTotal {
                category: Category::Food,
                total_cents: 25000,
            }],
            vec![budget(Category::Food, 30000)],
            vec![subscription(
                "Netflix",
                Some(at(2024, 3, 20)),
                SubscriptionStatus::Active,
            )],
        );
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["currentMonth"], "2024-03");
        assert_eq!(value["totalSpending"], serde_json::json!(250.0));
        assert_eq!(value["categorySpending"][0]["category"], "Food");
        assert_eq!(value["budgetUsage"][0]["status"], "good");
        assert_eq!(value["budgetUsage"][0]["percentage"], 83);
        assert_eq!(value["upcomingRenewals"][0]["renewalDate"], "2024-03-20");
        assert_eq!(value["upcomingRenewals"][0]["billingCycle"], "monthly");
    }
}
