pub mod config;
pub mod db;
pub mod domain;
pub mod email_client;
pub mod events;
pub mod handlers;
pub mod listeners;
pub mod routes;
pub mod startup;
pub mod telemetry;
