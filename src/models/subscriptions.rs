use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt::{Display, Formatter};
use validator::Validate;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SubscriptionError {
    #[error("Hotel already has an active subscription")]
    Conflict,
    #[error("Subscription {0} not found")]
    NotFound(i64),
    #[error("{0}")]
    InvalidState(&'static str),
    #[error("Next payment date is out of range")]
    DateOutOfRange,
    #[error("Storage failure: {0}")]
    Storage(String),
}

#[derive(Debug, thiserror::Error)]
#[error("`{value}` is not a valid subscription {kind}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

/// Billing cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Term {
    Monthly,
    Yearly,
}

impl Term {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// One billing period after `from`. Days past the end of the target month
    /// clamp to its last day.
    pub fn advance(&self, from: NaiveDate) -> Option<NaiveDate> {
        let months = match self {
            Self::Monthly => 1,
            Self::Yearly => 12,
        };
        from.checked_add_months(Months::new(months))
    }
}

impl TryFrom<String> for Term {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "MONTHLY" => Ok(Self::Monthly),
            "YEARLY" => Ok(Self::Yearly),
            _ => Err(UnknownVariant { kind: "term", value }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Active,
    Canceled,
    // Accepted by restart; nothing in this service moves a subscription here.
    Expired,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Canceled => "CANCELED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl TryFrom<String> for Status {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "ACTIVE" => Ok(Self::Active),
            "CANCELED" => Ok(Self::Canceled),
            "EXPIRED" => Ok(Self::Expired),
            _ => Err(UnknownVariant {
                kind: "status",
                value,
            }),
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hotel's subscription record. `id` is `None` until the store assigns one.
///
/// Transitions never mutate in place; each returns the next version of the
/// record and leaves persisting it to the caller.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Subscription {
    pub id: Option<i64>,
    pub hotel_id: i64,
    pub start_date: NaiveDate,
    pub next_payment: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub term: Term,
    #[sqlx(try_from = "String")]
    pub status: Status,
}

impl Subscription {
    pub fn start(
        hotel_id: i64,
        start_date: NaiveDate,
        term: Term,
    ) -> Result<Subscription, SubscriptionError> {
        let next_payment = term
            .advance(start_date)
            .ok_or(SubscriptionError::DateOutOfRange)?;

        Ok(Subscription {
            id: None,
            hotel_id,
            start_date,
            next_payment,
            end_date: None,
            term,
            status: Status::Active,
        })
    }

    pub fn cancel(&self, today: NaiveDate) -> Result<Subscription, SubscriptionError> {
        if self.status != Status::Active {
            return Err(SubscriptionError::InvalidState(
                "Cannot cancel a subscription that is not active",
            ));
        }

        Ok(Subscription {
            status: Status::Canceled,
            end_date: Some(today),
            ..self.clone()
        })
    }

    pub fn restart(&self, today: NaiveDate) -> Result<Subscription, SubscriptionError> {
        if !matches!(self.status, Status::Canceled | Status::Expired) {
            return Err(SubscriptionError::InvalidState(
                "Subscription must be either canceled or expired to be restarted",
            ));
        }

        let next_payment = self
            .term
            .advance(today)
            .ok_or(SubscriptionError::DateOutOfRange)?;

        Ok(Subscription {
            status: Status::Active,
            next_payment,
            end_date: None,
            ..self.clone()
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StartSubscriptionRequest {
    #[validate(range(min = 1, message = "hotelId must be a positive integer"))]
    pub hotel_id: i64,
    pub start_date: NaiveDate,
    pub term: Term,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub id: i64,
    pub hotel_id: i64,
    pub start_date: NaiveDate,
    pub next_payment: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub term: Term,
    pub status: Status,
}

impl TryFrom<Subscription> for SubscriptionResponse {
    type Error = SubscriptionError;

    fn try_from(subscription: Subscription) -> Result<Self, Self::Error> {
        let id = subscription.id.ok_or_else(|| {
            SubscriptionError::Storage("subscription was returned without an id".to_string())
        })?;

        Ok(SubscriptionResponse {
            id,
            hotel_id: subscription.hotel_id,
            start_date: subscription.start_date,
            next_payment: subscription.next_payment,
            end_date: subscription.end_date,
            term: subscription.term,
            status: subscription.status,
        })
    }
}
