//! Expense domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::constants::{DATE_FORMAT, DEFAULT_EXPENSE_PAGE_SIZE, MAX_EXPENSE_PAGE_SIZE};
use crate::errors::{Error, Result};
use crate::utils::{parse_date, required, validate_note, validate_title};

/// Domain model representing a recorded expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: String,
    #[serde(skip_serializing, default)]
    pub owner_id: String,
    pub title: String,
    pub category: Category,
    pub amount_cents: i64,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Validated input for creating an expense
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub title: String,
    pub category: Category,
    pub amount_cents: i64,
    pub date: NaiveDate,
    pub note: Option<String>,
}

/// Validated partial update. `None` leaves a field untouched; `note: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseUpdate {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub amount_cents: Option<i64>,
    pub date: Option<NaiveDate>,
    pub note: Option<Option<String>>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.amount_cents.is_none()
            && self.date.is_none()
            && self.note.is_none()
    }
}

/// Raw expense payload as received from a client, shared by create and partial update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseInput {
    pub title: Option<String>,
    pub category: Option<String>,
    pub amount_cents: Option<i64>,
    pub date: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub note: Option<Option<String>>,
}

impl ExpenseInput {
    /// Validates a create payload; every field except `note` is required.
    pub fn into_new_expense(self) -> Result<NewExpense> {
        let title = validate_title("title", required("title", self.title)?)?;
        let category = Category::parse_field("category", &required("category", self.category)?)?;
        let amount_cents = validate_amount(required("amount_cents", self.amount_cents)?)?;
        let date = parse_date("date", &required("date", self.date)?)?;
        let note = validate_note("note", self.note.flatten())?;
        Ok(NewExpense {
            title,
            category,
            amount_cents,
            date,
            note,
        })
    }

    /// Validates a partial update payload; only supplied fields are checked.
    pub fn into_update(self) -> Result<ExpenseUpdate> {
        Ok(ExpenseUpdate {
            title: self
                .title
                .map(|title| validate_title("title", title))
                .transpose()?,
            category: self
                .category
                .map(|category| Category::parse_field("category", &category))
                .transpose()?,
            amount_cents: self.amount_cents.map(validate_amount).transpose()?,
            date: self
                .date
                .map(|date| parse_date("date", &date))
                .transpose()?,
            note: self
                .note
                .map(|note| validate_note("note", note))
                .transpose()?,
        })
    }
}

fn validate_amount(amount_cents: i64) -> Result<i64> {
    if amount_cents <= 0 {
        return Err(Error::invalid_field(
            "amount_cents",
            "must be a positive integer number of cents",
        ));
    }
    Ok(amount_cents)
}

/// Query-string filters for listing expenses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseListQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub category: Option<String>,
    pub title: Option<String>,
    pub limit: Option<i64>,
    pub cursor: Option<String>,
}

impl ExpenseListQuery {
    pub fn into_filter(self) -> Result<ExpenseFilter> {
        let limit = match self.limit {
            None => DEFAULT_EXPENSE_PAGE_SIZE,
            Some(limit) if limit < 1 => {
                return Err(Error::invalid_field("limit", "must be at least 1"));
            }
            Some(limit) => limit.min(MAX_EXPENSE_PAGE_SIZE),
        };
        Ok(ExpenseFilter {
            from: non_blank(self.from)
                .map(|from| parse_date("from", &from))
                .transpose()?,
            to: non_blank(self.to)
                .map(|to| parse_date("to", &to))
                .transpose()?,
            category: non_blank(self.category)
                .map(|category| Category::parse_field("category", &category))
                .transpose()?,
            title: non_blank(self.title),
            limit,
            cursor: non_blank(self.cursor)
                .map(|cursor| cursor.parse::<ExpenseCursor>())
                .transpose()?,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validated listing filter passed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<Category>,
    pub title: Option<String>,
    pub limit: i64,
    pub cursor: Option<ExpenseCursor>,
}

impl Default for ExpenseFilter {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            category: None,
            title: None,
            limit: DEFAULT_EXPENSE_PAGE_SIZE,
            cursor: None,
        }
    }
}

/// Keyset position in the `(date DESC, created_at DESC, id DESC)` ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseCursor {
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub id: String,
}

const CURSOR_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

impl ExpenseCursor {
    pub fn after(expense: &Expense) -> Self {
        Self {
            date: expense.date,
            created_at: expense.created_at,
            id: expense.id.clone(),
        }
    }
}

impl fmt::Display for ExpenseCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}",
            self.date.format(DATE_FORMAT),
            self.created_at.format(CURSOR_TIMESTAMP_FORMAT),
            self.id
        )
    }
}

impl FromStr for ExpenseCursor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::invalid_field("cursor", "malformed cursor");
        let mut parts = s.splitn(3, '|');
        let (Some(date), Some(created_at), Some(id)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid())?;
        let created_at = NaiveDateTime::parse_from_str(created_at, CURSOR_TIMESTAMP_FORMAT)
            .map_err(|_| invalid())?;
        if id.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            date,
            created_at,
            id: id.to_string(),
        })
    }
}

/// One page of expenses plus the cursor for the next page, if there may be one.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpensePage {
    pub items: Vec<Expense>,
    pub next_cursor: Option<ExpenseCursor>,
}

/// Sum of expense amounts for one category in a date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total_cents: i64,
}
