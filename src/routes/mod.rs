use actix_web::web::{self, scope, ServiceConfig};
use actix_web::Scope;
use subscriptions::{
    cancel_subscription, get_all_subscriptions, restart_subscription, start_subscription,
};
mod health_check;
mod subscriptions;

use crate::core::AppError;
use crate::routes::health_check::*;

fn subscriptions_routes() -> Scope {
    scope("/subscriptions")
        .service(start_subscription)
        .service(get_all_subscriptions)
        .service(cancel_subscription)
        .service(restart_subscription)
}

pub fn hotel_subscriptions_routes(conf: &mut ServiceConfig) {
    // malformed bodies and ids answer with the same error body as the handlers
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::bad_request(err).into());
    let path_config = web::PathConfig::default()
        .error_handler(|err, _req| AppError::bad_request(err).into());

    conf.app_data(json_config)
        .app_data(path_config)
        .service(subscriptions_routes())
        .service(health_check);
}
