pub mod console;
pub mod email;

use anyhow::{Result, anyhow};

use crate::config::Config;
use crate::models::RenderedReport;

/// Delivery target for a finished report.
pub trait Publisher: std::fmt::Debug {
    fn publish(&self, report: &RenderedReport) -> Result<()>;
    fn name(&self) -> &str;
}

pub struct PublisherFactory;

impl PublisherFactory {
    pub fn create(config: &Config) -> Result<Box<dyn Publisher>> {
        match config.publisher_type.as_str() {
            "console" => Ok(Box::new(console::ConsolePublisher::new())),
            "email" => Ok(Box::new(email::EmailPublisher::from_config(config)?)),
            other => Err(anyhow!(
                "Unknown publisher type: {other}. Supported types: email, console"
            )),
        }
    }
}
