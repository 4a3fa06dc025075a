use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use fintrack_core::subscriptions::{
    NewSubscription, Subscription, SubscriptionRepositoryTrait, SubscriptionStatus,
};
use fintrack_core::Result;

use super::model::{NewSubscriptionDB, SubscriptionChangeset, SubscriptionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::subscriptions;

pub struct SubscriptionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SubscriptionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SubscriptionRepository { pool, writer }
    }
}

fn to_domain(rows: Vec<SubscriptionDB>) -> Result<Vec<Subscription>> {
    rows.into_iter()
        .map(|row| Subscription::try_from(row).map_err(Into::into))
        .collect()
}

#[async_trait]
impl SubscriptionRepositoryTrait for SubscriptionRepository {
    fn list(&self, owner: &str) -> Result<Vec<Subscription>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = subscriptions::table
            .filter(subscriptions::owner_id.eq(owner))
            .order_by((
                subscriptions::next_renewal_date.is_null().asc(),
                subscriptions::next_renewal_date.asc(),
                subscriptions::created_at.asc(),
            ))
            .select(SubscriptionDB::as_select())
            .load::<SubscriptionDB>(&mut conn)
            .into_core()?;
        to_domain(rows)
    }

    async fn create(&self, owner: &str, new_subscription: NewSubscription) -> Result<Subscription> {
        let row = NewSubscriptionDB {
            id: Uuid::new_v4().to_string(),
            owner_id: owner.to_string(),
            title: new_subscription.title,
            category: new_subscription.category.as_str().to_string(),
            amount_cents: new_subscription.amount_cents,
            billing_cycle: new_subscription.billing_cycle.as_str().to_string(),
            next_renewal_date: new_subscription.next_renewal_date,
            status: new_subscription.status.as_str().to_string(),
            note: new_subscription.note,
            created_at: Utc::now().naive_utc(),
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Subscription> {
                let created = diesel::insert_into(subscriptions::table)
                    .values(&row)
                    .returning(SubscriptionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Subscription::try_from(created)?)
            })
            .await
    }

    async fn update(
        &self,
        owner: &str,
        subscription_id: &str,
        subscription: NewSubscription,
    ) -> Result<Option<Subscription>> {
        let owner = owner.to_string();
        let subscription_id = subscription_id.to_string();
        let changeset = SubscriptionChangeset::from(subscription);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Subscription>> {
                let updated = diesel::update(
                    subscriptions::table
                        .filter(subscriptions::id.eq(subscription_id))
                        .filter(subscriptions::owner_id.eq(owner)),
                )
                .set(&changeset)
                .returning(SubscriptionDB::as_returning())
                .get_result::<SubscriptionDB>(conn)
                .optional()
                .map_err(StorageError::from)?;
                Ok(updated.map(Subscription::try_from).transpose()?)
            })
            .await
    }

    async fn delete(&self, owner: &str, subscription_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let subscription_id = subscription_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    subscriptions::table
                        .filter(subscriptions::id.eq(subscription_id))
                        .filter(subscriptions::owner_id.eq(owner)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    fn upcoming_renewals(&self, owner: &str) -> Result<Vec<Subscription>> {
        let mut conn = get_connection(&self.pool)?;
        let billable = [
            SubscriptionStatus::Active.as_str(),
            SubscriptionStatus::Trial.as_str(),
        ];
        let rows = subscriptions::table
            .filter(subscriptions::owner_id.eq(owner))
            .filter(subscriptions::status.eq_any(billable))
            .filter(subscriptions::next_renewal_date.is_not_null())
            .order_by((
                subscriptions::next_renewal_date.asc(),
                subscriptions::created_at.asc(),
            ))
            .select(SubscriptionDB::as_select())
            .load::<SubscriptionDB>(&mut conn)
            .into_core()?;
        to_domain(rows)
    }
}
