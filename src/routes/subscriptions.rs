use crate::core::AppError;
use crate::models::subscriptions::{StartSubscriptionRequest, SubscriptionResponse};
use crate::services::SubscriptionService;

use actix_web::{get, post, web, HttpResponse, Result};
use validator::Validate;

#[tracing::instrument(name = "Start Subscription Request", skip(service, request))]
#[post("")]
pub async fn start_subscription(
    service: web::Data<SubscriptionService>,
    request: web::Json<StartSubscriptionRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let request = request.into_inner();

    let subscription = service
        .start(request.hotel_id, request.start_date, request.term)
        .await?;

    Ok(HttpResponse::Ok().json(SubscriptionResponse::try_from(subscription)?))
}

#[tracing::instrument(name = "Cancel Subscription Request", skip(service))]
#[post("/{subscription_id}/cancel")]
pub async fn cancel_subscription(
    service: web::Data<SubscriptionService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let subscription = service.cancel(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(SubscriptionResponse::try_from(subscription)?))
}

#[tracing::instrument(name = "List Subscriptions Request", skip(service))]
#[get("")]
pub async fn get_all_subscriptions(
    service: web::Data<SubscriptionService>,
) -> Result<HttpResponse, AppError> {
    let subscriptions = service
        .list()
        .await?
        .into_iter()
        .map(SubscriptionResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HttpResponse::Ok().json(subscriptions))
}

#[tracing::instrument(name = "Restart Subscription Request", skip(service))]
#[post("/{subscription_id}/restart")]
pub async fn restart_subscription(
    service: web::Data<SubscriptionService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let subscription = service.restart(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(SubscriptionResponse::try_from(subscription)?))
}
