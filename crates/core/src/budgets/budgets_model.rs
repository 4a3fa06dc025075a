use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::categories::Category;
use crate::errors::{Error, Result};
use crate::utils::{dollars_to_cents, parse_month, required};

/// A spending limit for one category in one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: String,
    pub owner_id: String,
    pub category: Category,
    pub month: String,
    pub limit_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category: Category,
    pub month: String,
    pub limit_cents: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetInput {
    pub category: Option<String>,
    pub month: Option<String>,
    pub limit: Option<Decimal>,
}

impl BudgetInput {
    pub fn validate(self) -> Result<NewBudget> {
        let category = Category::parse_field("category", &required("category", self.category)?)?;
        let month = parse_month("month", &required("month", self.month)?)?;
        let limit = required("limit", self.limit)?;
        if limit < Decimal::ZERO {
            return Err(Error::invalid_field("limit", "must not be negative"));
        }
        Ok(NewBudget {
            category,
            month,
            limit_cents: dollars_to_cents(limit)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn limit_is_read_as_decimal_dollars() {
        let input: BudgetInput = serde_json::from_value(json!({
            "category": "Food",
            "month": "2024-03",
            "limit": 300.5
        }))
        .unwrap();
        let budget = input.validate().unwrap();
        assert_eq!(budget.limit_cents, 30050);
        assert_eq!(budget.month, "2024-03");
    }

    #[test]
    fn rejects_bad_month_and_negative_limit() {
        let bad_month: BudgetInput = serde_json::from_value(json!({
            "category": "Food",
            "month": "March",
            "limit": 10
        }))
        .unwrap();
        assert!(bad_month.validate().is_err());

        let negative: BudgetInput = serde_json::from_value(json!({
            "category": "Food",
            "month": "2024-03",
            "limit": -10
        }))
        .unwrap();
        let err = negative.validate().unwrap_err();
        assert!(err.to_string().contains("limit"));
    }
}
