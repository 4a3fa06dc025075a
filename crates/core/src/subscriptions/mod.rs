//! Recurring charges tracked per owner.

mod subscriptions_model;
mod subscriptions_service;
mod subscriptions_traits;

pub use subscriptions_model::{
    BillingCycle, NewSubscription, Subscription, SubscriptionInput, SubscriptionStatus,
};
pub use subscriptions_service::SubscriptionService;
pub use subscriptions_traits::{SubscriptionRepositoryTrait, SubscriptionServiceTrait};
