pub mod memory;
pub mod subscriptions;

use async_trait::async_trait;

use crate::models::subscriptions::{Status, Subscription, SubscriptionError};

pub use memory::InMemorySubscriptionStore;
pub use subscriptions::MySqlSubscriptionStore;

/// Persistence capability the lifecycle service depends on.
///
/// Implementations must keep at most one `ACTIVE` row per hotel and report a
/// violation from `save` as [`SubscriptionError::Conflict`].
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Subscription>, SubscriptionError>;

    async fn find_by_hotel_and_status(
        &self,
        hotel_id: i64,
        status: Status,
    ) -> Result<Vec<Subscription>, SubscriptionError>;

    /// Inserts when `id` is `None`, otherwise replaces every field of the row
    /// with that id. Returns the stored record.
    async fn save(&self, subscription: Subscription) -> Result<Subscription, SubscriptionError>;

    /// Every record, in insertion order.
    async fn find_all(&self) -> Result<Vec<Subscription>, SubscriptionError>;
}
