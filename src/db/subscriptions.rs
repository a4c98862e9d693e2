use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::db::SubscriptionStore;
use crate::models::subscriptions::{Status, Subscription, SubscriptionError};

const SELECT_COLUMNS: &str = r#"
    SELECT id, hotel_id, start_date, next_payment, end_date, term, status
    FROM tbl_subscriptions
"#;

#[derive(Clone)]
pub struct MySqlSubscriptionStore {
    pool: MySqlPool,
}

impl MySqlSubscriptionStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn storage_error(error: sqlx::Error) -> SubscriptionError {
    if let sqlx::Error::Database(db_error) = &error {
        // only uq_tbl_subscriptions_active_hotel can trip on save
        if db_error.is_unique_violation() {
            return SubscriptionError::Conflict;
        }
    }
    tracing::error!("Subscription store failure: {:?}", error);
    SubscriptionError::Storage(error.to_string())
}

fn assigned_id(last_insert_id: u64) -> Result<i64, SubscriptionError> {
    i64::try_from(last_insert_id).map_err(|_| {
        SubscriptionError::Storage(format!(
            "insert id {} does not fit a signed 64-bit id",
            last_insert_id
        ))
    })
}

#[async_trait]
impl SubscriptionStore for MySqlSubscriptionStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Subscription>, SubscriptionError> {
        sqlx::query_as::<_, Subscription>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)
    }

    async fn find_by_hotel_and_status(
        &self,
        hotel_id: i64,
        status: Status,
    ) -> Result<Vec<Subscription>, SubscriptionError> {
        sqlx::query_as::<_, Subscription>(&format!(
            "{} WHERE hotel_id = ? AND status = ? ORDER BY id ASC",
            SELECT_COLUMNS
        ))
        .bind(hotel_id)
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)
    }

    async fn save(&self, subscription: Subscription) -> Result<Subscription, SubscriptionError> {
        match subscription.id {
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO tbl_subscriptions
                    (hotel_id, start_date, next_payment, end_date, term, status)
                    VALUES (?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(subscription.hotel_id)
                .bind(subscription.start_date)
                .bind(subscription.next_payment)
                .bind(subscription.end_date)
                .bind(subscription.term.as_str())
                .bind(subscription.status.as_str())
                .execute(&self.pool)
                .await
                .map_err(storage_error)?;

                Ok(Subscription {
                    id: Some(assigned_id(result.last_insert_id())?),
                    ..subscription
                })
            }
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE tbl_subscriptions
                    SET hotel_id = ?, start_date = ?, next_payment = ?,
                        end_date = ?, term = ?, status = ?
                    WHERE id = ?
                    "#,
                )
                .bind(subscription.hotel_id)
                .bind(subscription.start_date)
                .bind(subscription.next_payment)
                .bind(subscription.end_date)
                .bind(subscription.term.as_str())
                .bind(subscription.status.as_str())
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(storage_error)?;

                // MySQL reports zero affected rows for a no-op update, so
                // existence is checked by reading the row back.
                self.find_by_id(id)
                    .await?
                    .ok_or(SubscriptionError::NotFound(id))
            }
        }
    }

    async fn find_all(&self) -> Result<Vec<Subscription>, SubscriptionError> {
        sqlx::query_as::<_, Subscription>(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)
    }
}
