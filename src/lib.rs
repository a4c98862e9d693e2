pub mod core;
pub mod db;
pub mod hotel_subscriptions_web_server;
pub mod models;
pub mod routes;
pub mod services;
