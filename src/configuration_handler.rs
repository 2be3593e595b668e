use crate::configuration::Configuration;
use crate::types::BusinessHours;
use clap::Parser;

/// Runtime settings. Without `--database-url` (or `DATABASE_URL` in the
/// environment or a `.env` file) the service runs on the in-memory store.
#[derive(Debug, Clone, Parser)]
#[command(name = "salon_booking", about = "Haircut appointment booking service")]
pub struct ConfigurationHandler {
    #[arg(long, default_value = "8080")]
    port: String,

    #[arg(long, default_value = "123")]
    admin_password: String,

    #[arg(long)]
    database_url: Option<String>,

    /// Opening hour of the shop (full hours).
    #[arg(long, default_value_t = 9)]
    open_hour: u32,

    /// Closing hour of the shop (full hours).
    #[arg(long, default_value_t = 17)]
    close_hour: u32,

    /// Slot alignment in minutes.
    #[arg(long, default_value_t = 30)]
    granularity_minutes: u32,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        dotenvy::dotenv().ok();
        let mut configuration = Self::parse();
        if configuration.database_url.is_none() {
            configuration.database_url = std::env::var("DATABASE_URL").ok();
        }
        configuration
    }
}

impl Configuration for ConfigurationHandler {
    fn password(&self) -> String {
        self.admin_password.clone()
    }

    fn port(&self) -> String {
        self.port.clone()
    }

    fn database_url(&self) -> Option<String> {
        self.database_url.clone()
    }

    fn business_hours(&self) -> BusinessHours {
        BusinessHours::from_hours(self.open_hour, self.close_hour)
    }

    fn granularity_minutes(&self) -> u32 {
        self.granularity_minutes
    }
}
