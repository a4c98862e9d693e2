use crate::helpers::{date, spawn_app};
use hotel_subscriptions::models::subscriptions::{Status, SubscriptionResponse, Term};
use serde_json::json;

fn monthly_for_hotel(hotel_id: i64) -> serde_json::Value {
    json!({"hotelId": hotel_id, "startDate": "2024-01-10", "term": "MONTHLY"})
}

async fn error_message(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("error body is json");
    assert_eq!(body["success"], json!(false));
    body["message"].as_str().expect("message is a string").to_owned()
}

#[tokio::test]
async fn start_returns_the_new_active_record() {
    let app = spawn_app(date(2024, 1, 10)).await;

    let response = app.start_subscription(&monthly_for_hotel(1)).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "id": 1,
            "hotelId": 1,
            "startDate": "2024-01-10",
            "nextPayment": "2024-02-10",
            "endDate": null,
            "term": "MONTHLY",
            "status": "ACTIVE",
        })
    );
}

#[tokio::test]
async fn start_yearly_sets_next_payment_a_year_out() {
    let app = spawn_app(date(2024, 1, 10)).await;

    let response = app
        .start_subscription(&json!({"hotelId": 9, "startDate": "2024-02-29", "term": "YEARLY"}))
        .await;

    assert_eq!(200, response.status().as_u16());
    let record: SubscriptionResponse = response.json().await.unwrap();
    assert_eq!(record.next_payment, date(2025, 2, 28));
    assert_eq!(record.term, Term::Yearly);
}

#[tokio::test]
async fn start_rejects_a_second_active_subscription_for_the_hotel() {
    let app = spawn_app(date(2024, 1, 10)).await;
    app.start_subscription(&monthly_for_hotel(1)).await;

    let response = app.start_subscription(&monthly_for_hotel(1)).await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        error_message(response).await,
        "Hotel already has an active subscription"
    );

    let all: Vec<SubscriptionResponse> = app.get_subscriptions().await.json().await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn start_returns_400_for_invalid_payloads() {
    let app = spawn_app(date(2024, 1, 10)).await;
    let test_cases = vec![
        (
            json!({"hotelId": 1, "startDate": "2024-01-10", "term": "WEEKLY"}),
            "unknown term",
        ),
        (
            json!({"hotelId": 1, "startDate": "10/01/2024", "term": "MONTHLY"}),
            "malformed date",
        ),
        (
            json!({"startDate": "2024-01-10", "term": "MONTHLY"}),
            "missing hotelId",
        ),
        (
            json!({"hotelId": 0, "startDate": "2024-01-10", "term": "MONTHLY"}),
            "non-positive hotelId",
        ),
    ];

    for (body, description) in test_cases {
        let response = app.start_subscription(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload had a {}.",
            description
        );
    }

    let all: Vec<SubscriptionResponse> = app.get_subscriptions().await.json().await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn cancel_sets_end_date_to_today() {
    let app = spawn_app(date(2024, 3, 1)).await;
    app.start_subscription(&monthly_for_hotel(1)).await;

    let response = app.cancel_subscription("1").await;

    assert_eq!(200, response.status().as_u16());
    let record: SubscriptionResponse = response.json().await.unwrap();
    assert_eq!(record.status, Status::Canceled);
    assert_eq!(record.end_date, Some(date(2024, 3, 1)));
    assert_eq!(record.next_payment, date(2024, 2, 10));
}

#[tokio::test]
async fn cancel_of_a_canceled_subscription_returns_400() {
    let app = spawn_app(date(2024, 3, 1)).await;
    app.start_subscription(&monthly_for_hotel(1)).await;
    app.cancel_subscription("1").await;

    let response = app.cancel_subscription("1").await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        error_message(response).await,
        "Cannot cancel a subscription that is not active"
    );
}

#[tokio::test]
async fn cancel_and_restart_of_unknown_ids_return_404() {
    let app = spawn_app(date(2024, 3, 1)).await;

    let cancel = app.cancel_subscription("42").await;
    let restart = app.restart_subscription("42").await;

    assert_eq!(404, cancel.status().as_u16());
    assert_eq!(error_message(cancel).await, "Subscription 42 not found");
    assert_eq!(404, restart.status().as_u16());
}

#[tokio::test]
async fn non_numeric_ids_return_400() {
    let app = spawn_app(date(2024, 3, 1)).await;

    let response = app.cancel_subscription("abc").await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn restart_reactivates_a_canceled_subscription() {
    let app = spawn_app(date(2024, 3, 15)).await;
    app.start_subscription(&monthly_for_hotel(1)).await;
    app.cancel_subscription("1").await;

    let response = app.restart_subscription("1").await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "id": 1,
            "hotelId": 1,
            "startDate": "2024-01-10",
            "nextPayment": "2024-04-15",
            "endDate": null,
            "term": "MONTHLY",
            "status": "ACTIVE",
        })
    );
}

#[tokio::test]
async fn restart_of_an_active_subscription_returns_400() {
    let app = spawn_app(date(2024, 3, 15)).await;
    app.start_subscription(&monthly_for_hotel(1)).await;

    let response = app.restart_subscription("1").await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        error_message(response).await,
        "Subscription must be either canceled or expired to be restarted"
    );
}

#[tokio::test]
async fn restart_is_refused_while_the_hotel_has_another_active_subscription() {
    let app = spawn_app(date(2024, 3, 15)).await;
    app.start_subscription(&monthly_for_hotel(1)).await;
    app.cancel_subscription("1").await;
    app.start_subscription(&monthly_for_hotel(1)).await;

    let response = app.restart_subscription("1").await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        error_message(response).await,
        "Hotel already has an active subscription"
    );
}

#[tokio::test]
async fn list_returns_every_subscription() {
    let app = spawn_app(date(2024, 3, 1)).await;

    let empty: Vec<SubscriptionResponse> = app.get_subscriptions().await.json().await.unwrap();
    assert!(empty.is_empty());

    app.start_subscription(&monthly_for_hotel(1)).await;
    app.start_subscription(&monthly_for_hotel(2)).await;
    app.cancel_subscription("2").await;

    let response = app.get_subscriptions().await;
    assert_eq!(200, response.status().as_u16());
    let all: Vec<SubscriptionResponse> = response.json().await.unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!((all[0].id, all[0].status), (1, Status::Active));
    assert_eq!((all[1].id, all[1].status), (2, Status::Canceled));
    assert_eq!(all[1].end_date, Some(date(2024, 3, 1)));
}
