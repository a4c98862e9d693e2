use chrono::NaiveDate;
use std::sync::Arc;

use crate::core::Clock;
use crate::db::SubscriptionStore;
use crate::models::subscriptions::{Status, Subscription, SubscriptionError, Term};

/// Applies the subscription lifecycle against a store.
///
/// Each operation is one read, one decision and at most one write; nothing is
/// cached between calls.
#[derive(Clone)]
pub struct SubscriptionService {
    store: Arc<dyn SubscriptionStore>,
    clock: Arc<dyn Clock>,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn SubscriptionStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    #[tracing::instrument(name = "Start Subscription", skip(self))]
    pub async fn start(
        &self,
        hotel_id: i64,
        start_date: NaiveDate,
        term: Term,
    ) -> Result<Subscription, SubscriptionError> {
        let active = self
            .store
            .find_by_hotel_and_status(hotel_id, Status::Active)
            .await?;
        if !active.is_empty() {
            tracing::warn!(hotel_id, "hotel already has an active subscription");
            return Err(SubscriptionError::Conflict);
        }

        let subscription = Subscription::start(hotel_id, start_date, term)?;
        let saved = self.store.save(subscription).await?;

        tracing::info!(subscription_id = ?saved.id, hotel_id, "subscription started");
        Ok(saved)
    }

    #[tracing::instrument(name = "Cancel Subscription", skip(self))]
    pub async fn cancel(&self, subscription_id: i64) -> Result<Subscription, SubscriptionError> {
        let current = self.find(subscription_id).await?;
        let canceled = current.cancel(self.clock.today()).map_err(|e| {
            tracing::warn!(subscription_id, status = %current.status, "{}", e);
            e
        })?;
        let saved = self.store.save(canceled).await?;

        tracing::info!(subscription_id, "subscription canceled");
        Ok(saved)
    }

    #[tracing::instrument(name = "List Subscriptions", skip(self))]
    pub async fn list(&self) -> Result<Vec<Subscription>, SubscriptionError> {
        self.store.find_all().await
    }

    #[tracing::instrument(name = "Restart Subscription", skip(self))]
    pub async fn restart(&self, subscription_id: i64) -> Result<Subscription, SubscriptionError> {
        let current = self.find(subscription_id).await?;
        let restarted = current.restart(self.clock.today()).map_err(|e| {
            tracing::warn!(subscription_id, status = %current.status, "{}", e);
            e
        })?;
        let saved = self.store.save(restarted).await?;

        tracing::info!(subscription_id, "subscription restarted");
        Ok(saved)
    }

    async fn find(&self, subscription_id: i64) -> Result<Subscription, SubscriptionError> {
        self.store
            .find_by_id(subscription_id)
            .await?
            .ok_or(SubscriptionError::NotFound(subscription_id))
    }
}
