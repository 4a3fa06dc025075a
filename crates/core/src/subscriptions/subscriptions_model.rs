use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::errors::{Error, Result};
use crate::utils::{dollars_to_cents, parse_date, required, validate_note, validate_title};

/// Recurrence interval of a subscription. `None` is a one-time charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Weekly,
    #[serde(rename = "bi-weekly")]
    BiWeekly,
    Monthly,
    Quarterly,
    Yearly,
    None,
}

impl BillingCycle {
    pub const ALL: [BillingCycle; 6] = [
        BillingCycle::Weekly,
        BillingCycle::BiWeekly,
        BillingCycle::Monthly,
        BillingCycle::Quarterly,
        BillingCycle::Yearly,
        BillingCycle::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Weekly => "weekly",
            BillingCycle::BiWeekly => "bi-weekly",
            BillingCycle::Monthly => "monthly",
            BillingCycle::Quarterly => "quarterly",
            BillingCycle::Yearly => "yearly",
            BillingCycle::None => "none",
        }
    }

    pub fn is_recurring(&self) -> bool {
        *self != BillingCycle::None
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingCycle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                Error::invalid_field(
                    "billing_cycle",
                    format!(
                        "'{s}' is not one of {}",
                        Self::ALL.map(|c| c.as_str()).join(", ")
                    ),
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Trial,
    Active,
    Canceled,
}

impl SubscriptionStatus {
    pub const ALL: [SubscriptionStatus; 3] = [
        SubscriptionStatus::Trial,
        SubscriptionStatus::Active,
        SubscriptionStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Trial => "trial",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceled => "canceled",
        }
    }

    /// Whether charges for this status are still expected.
    pub fn is_billable(&self) -> bool {
        matches!(self, SubscriptionStatus::Trial | SubscriptionStatus::Active)
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                Error::invalid_field(
                    "subscription_status",
                    format!(
                        "'{s}' is not one of {}",
                        Self::ALL.map(|c| c.as_str()).join(", ")
                    ),
                )
            })
    }
}

/// Domain model representing a subscription. Money is held in cents.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub category: Category,
    pub amount_cents: i64,
    pub billing_cycle: BillingCycle,
    pub next_renewal_date: Option<NaiveDate>,
    pub status: SubscriptionStatus,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Validated subscription fields, used for both create and full replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub title: String,
    pub category: Category,
    pub amount_cents: i64,
    pub billing_cycle: BillingCycle,
    pub next_renewal_date: Option<NaiveDate>,
    pub status: SubscriptionStatus,
    pub note: Option<String>,
}

/// Unvalidated subscription payload with the amount in decimal currency units.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionInput {
    pub title: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub billing_cycle: Option<String>,
    pub next_renewal_date: Option<String>,
    pub status: Option<String>,
    pub note: Option<String>,
}

impl SubscriptionInput {
    pub fn validate(self) -> Result<NewSubscription> {
        let title = validate_title(
            "subscription_title",
            required("subscription_title", self.title)?,
        )?;
        let category = Category::parse_field(
            "subscription_category",
            &required("subscription_category", self.category)?,
        )?;

        let amount = required("subscription_amount", self.amount)?;
        if amount < Decimal::ZERO {
            return Err(Error::invalid_field(
                "subscription_amount",
                "must not be negative",
            ));
        }
        let amount_cents = dollars_to_cents(amount)
            .map_err(|_| Error::invalid_field("subscription_amount", "value is out of range"))?;

        let billing_cycle: BillingCycle = required("billing_cycle", self.billing_cycle)?.parse()?;
        let status: SubscriptionStatus =
            required("subscription_status", self.status)?.parse()?;

        let next_renewal_date = self
            .next_renewal_date
            .filter(|d| !d.trim().is_empty())
            .map(|d| parse_date("next_renewal_date", &d))
            .transpose()?;
        match (billing_cycle.is_recurring(), next_renewal_date) {
            (true, None) => {
                return Err(Error::invalid_field(
                    "next_renewal_date",
                    format!("is required when billing_cycle is '{billing_cycle}'"),
                ));
            }
            (false, Some(_)) => {
                return Err(Error::invalid_field(
                    "next_renewal_date",
                    "must be empty when billing_cycle is 'none'",
                ));
            }
            _ => {}
        }

        Ok(NewSubscription {
            title,
            category,
            amount_cents,
            billing_cycle,
            next_renewal_date,
            status,
            note: validate_note("subscription_note", self.note)?,
        })
    }
}
