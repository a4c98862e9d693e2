use std::fmt::{Debug, Display};

use hotel_subscriptions::core::{get_subscriber, init_subscriber, AppConfig};
use hotel_subscriptions::hotel_subscriptions_web_server::HotelSubscriptionsWebServer;
use tokio::task::JoinError;

use colored::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new()?;

    let file_appender =
        tracing_appender::rolling::daily(&config.logging.directory, &config.logging.file_prefix);

    let subscriber = get_subscriber(
        "hotel_subscriptions".into(),
        config.logging.level.clone(),
        file_appender,
    );
    init_subscriber(subscriber)?;

    let web_server = HotelSubscriptionsWebServer::build(config.clone()).await?;

    let server_task = tokio::spawn(web_server.run_until_stopped());

    println!("{}", "-----------------------------------------".green());
    println!(
        "🚀 Server started on Addr: {}:{}",
        config.server.host, config.server.port
    );
    println!("{}", "-----------------------------------------".green());

    tokio::select! {
        o = server_task => {report_exit("hotel_subscriptions_web_server", o);}
    }
    Ok(())
}

fn report_exit(task_name: &str, outcome: Result<Result<(), impl Debug + Display>, JoinError>) {
    match outcome {
        Ok(Ok(())) => {
            tracing::info!("{} has exited", task_name)
        }
        Ok(Err(e)) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} failed",
                task_name
            )
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} task failed to complete",
                task_name
            )
        }
    }
}
