//! Database models for subscriptions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use fintrack_core::subscriptions::{NewSubscription, Subscription};

use crate::errors::StorageError;
use crate::utils::parse_column;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::subscriptions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SubscriptionDB {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub category: String,
    pub amount_cents: i64,
    pub billing_cycle: String,
    pub next_renewal_date: Option<NaiveDate>,
    pub status: String,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::subscriptions)]
pub struct NewSubscriptionDB {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub category: String,
    pub amount_cents: i64,
    pub billing_cycle: String,
    pub next_renewal_date: Option<NaiveDate>,
    pub status: String,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Full replacement of the mutable columns. `None` values are written as NULL.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = crate::schema::subscriptions)]
#[diesel(treat_none_as_null = true)]
pub struct SubscriptionChangeset {
    pub title: String,
    pub category: String,
    pub amount_cents: i64,
    pub billing_cycle: String,
    pub next_renewal_date: Option<NaiveDate>,
    pub status: String,
    pub note: Option<String>,
}

impl From<NewSubscription> for SubscriptionChangeset {
    fn from(s: NewSubscription) -> Self {
        Self {
            title: s.title,
            category: s.category.as_str().to_string(),
            amount_cents: s.amount_cents,
            billing_cycle: s.billing_cycle.as_str().to_string(),
            next_renewal_date: s.next_renewal_date,
            status: s.status.as_str().to_string(),
            note: s.note,
        }
    }
}

impl TryFrom<SubscriptionDB> for Subscription {
    type Error = StorageError;

    fn try_from(db: SubscriptionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            category: parse_column("category", &db.category)?,
            billing_cycle: parse_column("billing_cycle", &db.billing_cycle)?,
            status: parse_column("status", &db.status)?,
            id: db.id,
            owner_id: db.owner_id,
            title: db.title,
            amount_cents: db.amount_cents,
            next_renewal_date: db.next_renewal_date,
            note: db.note,
            created_at: db.created_at,
        })
    }
}
