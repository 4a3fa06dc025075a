//! Wire shapes that differ from the core domain types.

use chrono::{NaiveDate, NaiveDateTime};
use fintrack_core::budgets::Budget;
use fintrack_core::subscriptions::{
    BillingCycle, Subscription, SubscriptionInput, SubscriptionStatus,
};
use fintrack_core::utils::cents_to_dollars;
use fintrack_core::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Subscription create/replace body. The amount is in decimal dollars.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionPayload {
    pub subscription_title: Option<String>,
    pub subscription_category: Option<String>,
    pub subscription_amount: Option<Decimal>,
    pub billing_cycle: Option<String>,
    pub next_renewal_date: Option<String>,
    pub subscription_status: Option<String>,
    pub subscription_note: Option<String>,
}

impl From<SubscriptionPayload> for SubscriptionInput {
    fn from(payload: SubscriptionPayload) -> Self {
        SubscriptionInput {
            title: payload.subscription_title,
            category: payload.subscription_category,
            amount: payload.subscription_amount,
            billing_cycle: payload.billing_cycle,
            next_renewal_date: payload.next_renewal_date,
            status: payload.subscription_status,
            note: payload.subscription_note,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionResponse {
    pub subscription_id: String,
    pub subscription_title: String,
    pub subscription_category: Category,
    pub subscription_amount: Decimal,
    pub billing_cycle: BillingCycle,
    pub next_renewal_date: Option<NaiveDate>,
    pub subscription_status: SubscriptionStatus,
    pub subscription_note: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(s: Subscription) -> Self {
        Self {
            subscription_id: s.id,
            subscription_title: s.title,
            subscription_category: s.category,
            subscription_amount: cents_to_dollars(s.amount_cents),
            billing_cycle: s.billing_cycle,
            next_renewal_date: s.next_renewal_date,
            subscription_status: s.status,
            subscription_note: s.note,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionDeleted {
    pub success: bool,
    pub subscription_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResponse {
    pub id: String,
    pub category: Category,
    pub month: String,
    pub limit: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Budget> for BudgetResponse {
    fn from(b: Budget) -> Self {
        Self {
            id: b.id,
            category: b.category,
            month: b.month,
            limit: cents_to_dollars(b.limit_cents),
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetMonthQuery {
    pub month: Option<String>,
}
