use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{Error, Result};
use crate::subscriptions::subscriptions_model::{Subscription, SubscriptionInput};
use crate::subscriptions::subscriptions_traits::{
    SubscriptionRepositoryTrait, SubscriptionServiceTrait,
};
use crate::utils::validate_id;

pub struct SubscriptionService {
    repository: Arc<dyn SubscriptionRepositoryTrait>,
}

impl SubscriptionService {
    pub fn new(repository: Arc<dyn SubscriptionRepositoryTrait>) -> Self {
        SubscriptionService { repository }
    }
}

#[async_trait]
impl SubscriptionServiceTrait for SubscriptionService {
    fn list_subscriptions(&self, owner_id: &str) -> Result<Vec<Subscription>> {
        self.repository.list(owner_id)
    }

    async fn create_subscription(
        &self,
        owner_id: &str,
        input: SubscriptionInput,
    ) -> Result<Subscription> {
        let new_subscription = input.validate()?;
        self.repository.create(owner_id, new_subscription).await
    }

    async fn update_subscription(
        &self,
        owner_id: &str,
        subscription_id: &str,
        input: SubscriptionInput,
    ) -> Result<Subscription> {
        validate_id("id", subscription_id)?;
        let subscription = input.validate()?;
        self.repository
            .update(owner_id, subscription_id, subscription)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Subscription {subscription_id}")))
    }

    async fn delete_subscription(&self, owner_id: &str, subscription_id: &str) -> Result<()> {
        validate_id("id", subscription_id)?;
        if self.repository.delete(owner_id, subscription_id).await? == 0 {
            return Err(Error::NotFound(format!("Subscription {subscription_id}")));
        }
        Ok(())
    }
}
