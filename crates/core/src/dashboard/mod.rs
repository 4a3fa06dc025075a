//! Monthly spending snapshot combining expenses, budgets and renewals.

mod dashboard_model;
mod dashboard_service;

pub use dashboard_model::{
    build_summary, classify_budget, BudgetStatus, BudgetUsage, CategorySpending,
    DashboardSummary, UpcomingRenewal,
};
pub use dashboard_service::{DashboardService, DashboardServiceTrait};
