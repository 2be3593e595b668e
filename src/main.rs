use std::time::Duration;

use crate::{
    catalog::Catalog, configuration::Configuration, configuration_handler::ConfigurationHandler,
    database_interface::DatabaseInterface, http::create_app, local_store::LocalStore,
    scheduler::Scheduler,
};
use tokio::time::sleep;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod backend;
mod catalog;
mod configuration;
mod configuration_handler;
mod database_interface;
mod error;
mod http;
mod local_store;
mod scheduler;
mod schema;
#[cfg(test)]
mod testutils;
mod types;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("#################");
    println!("# Salon Booking #");
    println!("#################");

    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Accessible at:\n{}", address.clone());
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    let app = if let Some(database_url) = configuration.database_url() {
        let store = loop {
            match DatabaseInterface::new(&database_url) {
                Ok(store) => {
                    info!("Successfully connected to database");
                    break store;
                }
                Err(err) => {
                    error!(?err, "Failed to establish database connection: {database_url}. Retry in 1 sec. You may want to restart with the database disabled (impersistent appointments).");
                    sleep(Duration::from_secs(1)).await;
                }
            }
        };
        let scheduler = Scheduler::new(
            store,
            Catalog::default(),
            configuration.business_hours(),
            configuration.granularity_minutes(),
        );
        create_app(scheduler, configuration)
    } else {
        let store = LocalStore::default();
        let scheduler = Scheduler::new(
            store,
            Catalog::default(),
            configuration.business_hours(),
            configuration.granularity_minutes(),
        );
        create_app(scheduler, configuration)
    };

    axum::serve(listener, app).await.unwrap();
}
