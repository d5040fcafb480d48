//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::str::FromStr;

use eventhub_booking::domain::policy::{BookingPolicy, BookingVisibility, MissingEnrollmentPolicy};

use crate::error::AppError;

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Upper bound on pooled database connections.
    pub max_connections: u32,
    /// Booking policy settings.
    pub policy: BookingPolicy,
    /// OTLP collector endpoint; span export is disabled when unset.
    pub otlp_endpoint: Option<String>,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of
    /// a variable or `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a value
    /// cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".into())
        })?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = parse_or(&lookup, "PORT", 3000)?;
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?;
        let missing_enrollment: MissingEnrollmentPolicy =
            parse_or(&lookup, "BOOKING_MISSING_ENROLLMENT", MissingEnrollmentPolicy::default())?;
        let visibility: BookingVisibility =
            parse_or(&lookup, "BOOKING_VISIBILITY", BookingVisibility::default())?;
        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            policy: BookingPolicy {
                missing_enrollment,
                visibility,
            },
            otlp_endpoint,
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST` and `PORT` do not form a socket
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_only_database_url_is_set() {
        // Arrange / Act
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/eventhub")]).unwrap();

        // Assert
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.policy, BookingPolicy::default());
        assert_eq!(config.otlp_endpoint, None);
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_missing_database_url_is_a_config_error() {
        let err = config_from(&[]).unwrap_err();

        assert!(matches!(err, AppError::Config(message) if message.contains("DATABASE_URL")));
    }

    #[test]
    fn test_policy_settings_are_parsed() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/eventhub"),
            ("BOOKING_MISSING_ENROLLMENT", "forbidden"),
            ("BOOKING_VISIBILITY", "require_hotel_ticket"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
        ])
        .unwrap();

        assert_eq!(
            config.policy.missing_enrollment,
            MissingEnrollmentPolicy::Forbidden
        );
        assert_eq!(
            config.policy.visibility,
            BookingVisibility::RequireHotelTicket
        );
        assert_eq!(
            config.otlp_endpoint.as_deref(),
            Some("http://localhost:4317")
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for (key, value) in [
            ("PORT", "eighty"),
            ("DATABASE_MAX_CONNECTIONS", "-1"),
            ("BOOKING_MISSING_ENROLLMENT", "maybe"),
            ("BOOKING_VISIBILITY", "public"),
        ] {
            let err = config_from(&[("DATABASE_URL", "postgres://localhost/eventhub"), (key, value)])
                .unwrap_err();

            assert!(
                matches!(&err, AppError::Config(message) if message.starts_with(key)),
                "{key}={value} gave {err}"
            );
        }
    }

    #[test]
    fn test_invalid_host_fails_socket_addr() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/eventhub"),
            ("HOST", "not a host"),
        ])
        .unwrap();

        assert!(matches!(config.socket_addr(), Err(AppError::Config(_))));
    }
}
