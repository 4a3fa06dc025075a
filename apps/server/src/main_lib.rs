use std::sync::Arc;

use fintrack_ai::{ChatService, GeminiProvider};
use fintrack_core::{
    budgets::{BudgetService, BudgetServiceTrait},
    dashboard::{DashboardService, DashboardServiceTrait},
    expenses::{ExpenseService, ExpenseServiceTrait},
    subscriptions::{SubscriptionService, SubscriptionServiceTrait},
};
use fintrack_storage_sqlite::{
    db, BudgetRepository, ExpenseRepository, SubscriptionRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::{JwtAuthenticator, OwnerAuthenticator, StaticOwnerAuthenticator},
    config::{AuthConfig, Config, LogFormat},
};

pub struct AppState {
    pub expense_service: Arc<dyn ExpenseServiceTrait>,
    pub subscription_service: Arc<dyn SubscriptionServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
    pub chat_service: Arc<ChatService>,
    pub authenticator: Arc<dyn OwnerAuthenticator>,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_current_span(false)))
        .with((!json).then(|| fmt::layer()))
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);
    let pool = db::create_pool(&config.db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(pool.as_ref().clone());

    let expense_repository = Arc::new(ExpenseRepository::new(pool.clone(), writer.clone()));
    let subscription_repository =
        Arc::new(SubscriptionRepository::new(pool.clone(), writer.clone()));
    let budget_repository = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));

    let expense_service: Arc<dyn ExpenseServiceTrait> =
        Arc::new(ExpenseService::new(expense_repository.clone()));
    let subscription_service: Arc<dyn SubscriptionServiceTrait> =
        Arc::new(SubscriptionService::new(subscription_repository.clone()));
    let budget_service: Arc<dyn BudgetServiceTrait> =
        Arc::new(BudgetService::new(budget_repository.clone()));

    // The dashboard reads straight from the repositories, concurrently.
    let dashboard_service: Arc<dyn DashboardServiceTrait> = Arc::new(DashboardService::new(
        expense_repository,
        budget_repository,
        subscription_repository,
    ));

    if config.ai.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; the chat assistant will be unavailable");
    }
    let chat_service = Arc::new(ChatService::new(Arc::new(GeminiProvider::new(
        config.ai.clone(),
    )?)));

    let authenticator: Arc<dyn OwnerAuthenticator> = match &config.auth {
        AuthConfig::Jwt { secret } => Arc::new(JwtAuthenticator::new(secret)),
        AuthConfig::DevOwner(owner) => {
            tracing::warn!(
                "Authentication disabled: every request is treated as owner '{}'",
                owner
            );
            Arc::new(StaticOwnerAuthenticator::new(owner.clone()))
        }
    };

    Ok(Arc::new(AppState {
        expense_service,
        subscription_service,
        budget_service,
        dashboard_service,
        chat_service,
        authenticator,
    }))
}
