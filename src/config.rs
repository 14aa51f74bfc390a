use std::env;

use crate::error::ConfigError;

/// Where the webhook server listens. Read from `IP` and `PORT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub ip: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ip: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        Ok(Self {
            ip: lookup("IP").unwrap_or(defaults.ip),
            port,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.addr(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_ip_and_port() {
        let settings = Settings::from_lookup(lookup(&[("IP", "127.0.0.1"), ("PORT", "8080")])).unwrap();
        assert_eq!(settings.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = Settings::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref p) if p == "http"));
    }
}
