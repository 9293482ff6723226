use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a valid number, got '{0}'")]
    InvalidPort(String),
}

/// Runtime settings read from the process environment.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
}

/// Which store variables were supplied, without revealing their values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvPresence {
    pub database_url: bool,
    pub database_name: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => 8000,
        };

        Ok(Self {
            host,
            port,
            database_url: non_empty_var("DATABASE_URL"),
            database_name: non_empty_var("DATABASE_NAME"),
        })
    }

    pub fn env_presence(&self) -> EnvPresence {
        EnvPresence {
            database_url: self.database_url.is_some(),
            database_name: self.database_name.is_some(),
        }
    }

    /// `DATABASE_URL` with its database replaced by `DATABASE_NAME`, if set.
    pub fn connection_url(&self) -> Option<String> {
        let url = self.database_url.as_deref()?;
        Some(match self.database_name.as_deref() {
            Some(name) => with_database(url, name),
            None => url.to_string(),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn with_database(url: &str, name: &str) -> String {
    let (base, query) = match url.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (url, None),
    };
    let authority = base.find("://").map_or(0, |i| i + 3);
    let root = match base[authority..].find('/') {
        Some(i) => &base[..authority + i],
        None => base,
    };
    match query {
        Some(query) => format!("{root}/{name}?{query}"),
        None => format!("{root}/{name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: Option<&str>, name: Option<&str>) -> Settings {
        Settings {
            database_url: url.map(str::to_string),
            database_name: name.map(str::to_string),
            ..Settings::default()
        }
    }

    #[test]
    fn connection_url_requires_database_url() {
        assert_eq!(settings(None, Some("orders")).connection_url(), None);
    }

    #[test]
    fn connection_url_without_name_is_unchanged() {
        let s = settings(Some("postgres://u:p@localhost:5432/app"), None);
        assert_eq!(
            s.connection_url().as_deref(),
            Some("postgres://u:p@localhost:5432/app")
        );
    }

    #[test]
    fn database_name_replaces_path() {
        assert_eq!(
            with_database("postgres://u:p@localhost:5432/app", "orders"),
            "postgres://u:p@localhost:5432/orders"
        );
        assert_eq!(
            with_database("postgres://localhost", "orders"),
            "postgres://localhost/orders"
        );
        assert_eq!(
            with_database("postgres://localhost/app?sslmode=disable", "orders"),
            "postgres://localhost/orders?sslmode=disable"
        );
    }

    #[test]
    fn env_presence_reports_flags() {
        assert_eq!(
            settings(Some("postgres://localhost"), None).env_presence(),
            EnvPresence {
                database_url: true,
                database_name: false
            }
        );
    }
}
