use crate::core::config::StorageBackend;
use crate::core::{AppConfig, Clock, SystemClock};
use crate::db::{InMemorySubscriptionStore, MySqlSubscriptionStore, SubscriptionStore};
use crate::routes::hotel_subscriptions_routes;
use crate::services::SubscriptionService;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{dev::Server, web::Data, App, HttpServer};
use sqlx::mysql::MySqlPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct HotelSubscriptionsWebServer {
    server: Server,
}

impl HotelSubscriptionsWebServer {
    pub async fn build(configuration: AppConfig) -> Result<Self, anyhow::Error> {
        let address = format!(
            "{}:{}",
            configuration.server.host, configuration.server.port
        );

        let store: Arc<dyn SubscriptionStore> = match configuration.storage.backend {
            StorageBackend::Mysql => {
                let mysql_pool = MySqlPoolOptions::new()
                    .acquire_timeout(std::time::Duration::from_secs(
                        configuration.mysql.acquire_timeout_seconds,
                    ))
                    .connect_lazy_with(configuration.mysql.connect());

                sqlx::migrate!("./migrations").run(&mysql_pool).await?;

                Arc::new(MySqlSubscriptionStore::new(mysql_pool))
            }
            StorageBackend::Memory => {
                tracing::warn!(
                    "using the in-memory subscription store, data will not survive a restart"
                );
                Arc::new(InMemorySubscriptionStore::new())
            }
        };

        let listener = TcpListener::bind(address)?;
        let server = run(listener, store, Arc::new(SystemClock))?;

        Ok(Self { server })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    store: Arc<dyn SubscriptionStore>,
    clock: Arc<dyn Clock>,
) -> Result<Server, anyhow::Error> {
    let subscription_service = Data::new(SubscriptionService::new(store, clock));

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .supports_credentials();
        App::new()
            .wrap(TracingLogger::default())
            .configure(hotel_subscriptions_routes)
            .app_data(subscription_service.clone())
            .wrap(cors)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
