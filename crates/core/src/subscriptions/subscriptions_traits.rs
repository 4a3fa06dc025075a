use async_trait::async_trait;

use crate::errors::Result;
use crate::subscriptions::subscriptions_model::{NewSubscription, Subscription, SubscriptionInput};

/// Trait for subscription repository operations. Mutations are owner-scoped.
#[async_trait]
pub trait SubscriptionRepositoryTrait: Send + Sync {
    /// All rows for the owner; rows without a renewal date sort last.
    fn list(&self, owner_id: &str) -> Result<Vec<Subscription>>;
    async fn create(&self, owner_id: &str, new_subscription: NewSubscription)
        -> Result<Subscription>;
    async fn update(
        &self,
        owner_id: &str,
        subscription_id: &str,
        subscription: NewSubscription,
    ) -> Result<Option<Subscription>>;
    async fn delete(&self, owner_id: &str, subscription_id: &str) -> Result<usize>;

    /// Active or trial rows with a renewal date, soonest first. No date cutoff.
    fn upcoming_renewals(&self, owner_id: &str) -> Result<Vec<Subscription>>;
}

/// Trait for subscription service operations
#[async_trait]
pub trait SubscriptionServiceTrait: Send + Sync {
    fn list_subscriptions(&self, owner_id: &str) -> Result<Vec<Subscription>>;
    async fn create_subscription(
        &self,
        owner_id: &str,
        input: SubscriptionInput,
    ) -> Result<Subscription>;
    async fn update_subscription(
        &self,
        owner_id: &str,
        subscription_id: &str,
        input: SubscriptionInput,
    ) -> Result<Subscription>;
    async fn delete_subscription(&self, owner_id: &str, subscription_id: &str) -> Result<()>;
}
