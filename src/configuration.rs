use crate::types::BusinessHours;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn password(&self) -> String;
    fn port(&self) -> String;
    fn database_url(&self) -> Option<String>;
    fn business_hours(&self) -> BusinessHours;
    fn granularity_minutes(&self) -> u32;
}
