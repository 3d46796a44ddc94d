use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Result, anyhow};

/// Runtime configuration, loaded from environment variables.
///
/// Every value has a default except the mail addressing fields, which are
/// validated only when the email publisher is selected. The SMTP password
/// is a deployment-time secret and defaults to empty.
#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_path: String,

    // Report
    pub report_prefix: String,
    pub report_file_prefix: String,
    pub output_dir: String,

    // Delivery
    pub publisher_type: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: String,
    pub mail_from: Option<String>,
    pub mail_to: Option<String>,
    pub mail_subject: String,

    // Application
    pub log_level: String,
    pub log_file: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let database_path = get_env_with_default("DATABASE_PATH", "cbdb.db");

        let report_prefix = get_env_with_default("REPORT_PREFIX", "ClientBoxx");
        let report_file_prefix = get_env_with_default("REPORT_FILE_PREFIX", "usage_report");
        let output_dir = get_env_with_default("OUTPUT_DIR", ".");

        let publisher_type = get_env_with_default("PUBLISHER_TYPE", "email");
        let smtp_host = get_env_with_default("SMTP_HOST", "smtp.gmail.com");
        let smtp_port = get_env_parsed("SMTP_PORT", 587)?;
        let smtp_username = get_env_optional("SMTP_USERNAME");
        let smtp_password = get_env_with_default("SMTP_PASSWORD", "");
        let mail_from = get_env_optional("MAIL_FROM");
        let mail_to = get_env_optional("MAIL_TO");
        let mail_subject = get_env_with_default("MAIL_SUBJECT", "Usage Report");

        let log_level = get_env_with_default("LOG_LEVEL", "info");
        let log_file = get_env_with_default("LOG_FILE", "report.log");

        Ok(Config {
            database_path,
            report_prefix,
            report_file_prefix,
            output_dir,
            publisher_type,
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            mail_from,
            mail_to,
            mail_subject,
            log_level,
            log_file,
        })
    }

    pub fn validate(&self) -> Result<()> {
        match self.publisher_type.as_str() {
            "email" => {
                if self.smtp_username.is_none() {
                    return Err(anyhow!(
                        "SMTP_USERNAME is required when using the email publisher"
                    ));
                }
                if self.mail_from.is_none() {
                    return Err(anyhow!(
                        "MAIL_FROM is required when using the email publisher"
                    ));
                }
                if self.mail_to.is_none() {
                    return Err(anyhow!("MAIL_TO is required when using the email publisher"));
                }
            }
            "console" => {
                // No additional requirements for console output
            }
            other => {
                return Err(anyhow!(
                    "Invalid publisher type: {other}. Supported types: email, console"
                ));
            }
        }

        Ok(())
    }
}

fn get_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn get_env_with_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_parsed<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e| anyhow!("Invalid value for {key}: {e}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    pub fn new_for_test() -> Self {
        Self {
            database_path: ":memory:".to_string(),
            report_prefix: "ClientBoxx".to_string(),
            report_file_prefix: "usage_report".to_string(),
            output_dir: ".".to_string(),
            publisher_type: "console".to_string(),
            smtp_host: "localhost".to_string(),
            smtp_port: 2525,
            smtp_username: None,
            smtp_password: String::new(),
            mail_from: None,
            mail_to: None,
            mail_subject: "Usage Report".to_string(),
            log_level: "info".to_string(),
            log_file: "report.log".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_for_test() {
        let config = Config::new_for_test();
        assert_eq!(config.database_path, ":memory:");
        assert_eq!(config.report_prefix, "ClientBoxx");
        assert_eq!(config.smtp_port, 2525);
        assert_eq!(config.publisher_type, "console");
    }

    #[test]
    fn test_validate_console() {
        let config = Config::new_for_test();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_email_missing_username() {
        let mut config = Config::new_for_test();
        config.publisher_type = "email".to_string();

        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("SMTP_USERNAME is required")
        );
    }

    #[test]
    fn test_validate_email_missing_recipient() {
        let mut config = Config::new_for_test();
        config.publisher_type = "email".to_string();
        config.smtp_username = Some("reports@example.com".to_string());
        config.mail_from = Some("reports@example.com".to_string());

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("MAIL_TO is required"));
    }

    #[test]
    fn test_validate_email_complete() {
        let mut config = Config::new_for_test();
        config.publisher_type = "email".to_string();
        config.smtp_username = Some("reports@example.com".to_string());
        config.mail_from = Some("reports@example.com".to_string());
        config.mail_to = Some("ops@example.com".to_string());

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_publisher_type() {
        let mut config = Config::new_for_test();
        config.publisher_type = "carrier-pigeon".to_string();

        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid publisher type")
        );
    }
}
