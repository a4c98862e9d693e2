use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::db::SubscriptionStore;
use crate::models::subscriptions::{Status, Subscription, SubscriptionError};

/// Process-local store with sequential ids starting at 1.
#[derive(Default)]
pub struct InMemorySubscriptionStore {
    rows: RwLock<BTreeMap<i64, Subscription>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Subscription>, SubscriptionError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_by_hotel_and_status(
        &self,
        hotel_id: i64,
        status: Status,
    ) -> Result<Vec<Subscription>, SubscriptionError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|s| s.hotel_id == hotel_id && s.status == status)
            .cloned()
            .collect())
    }

    async fn save(&self, subscription: Subscription) -> Result<Subscription, SubscriptionError> {
        let mut rows = self.rows.write().await;

        if subscription.status == Status::Active {
            let clash = rows.values().any(|existing| {
                existing.hotel_id == subscription.hotel_id
                    && existing.status == Status::Active
                    && existing.id != subscription.id
            });
            if clash {
                return Err(SubscriptionError::Conflict);
            }
        }

        let id = match subscription.id {
            Some(id) if rows.contains_key(&id) => id,
            Some(id) => return Err(SubscriptionError::NotFound(id)),
            None => rows.keys().next_back().map_or(1, |last| last + 1),
        };

        let stored = Subscription {
            id: Some(id),
            ..subscription
        };
        rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<Subscription>, SubscriptionError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }
}
