use chrono::Duration;
use std::env;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Voice transport credentials. Only their presence is reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub url: Option<String>,
}

impl VoiceConfig {
    pub fn is_enabled(&self) -> bool {
        self.missing().is_empty()
    }

    /// Names of the variables still unset.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("LIVEKIT_API_KEY", &self.api_key),
            ("LIVEKIT_API_SECRET", &self.api_secret),
            ("LIVEKIT_URL", &self.url),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub coingecko_api_url: String,
    pub cache_ttl_secs: i64,
    /// `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
    pub voice: VoiceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            coingecko_api_url: DEFAULT_COINGECKO_API_URL.to_string(),
            cache_ttl_secs: common::DEFAULT_TTL_SECS,
            cors_allowed_origin: None,
            voice: VoiceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read from the process environment. Call `dotenv().ok()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "a port number",
                value: raw,
            })?,
            None => defaults.port,
        };

        let cache_ttl_secs = match get("CACHE_TTL_SECS") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(secs) if secs > 0 && Duration::try_seconds(secs).is_some() => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "CACHE_TTL_SECS",
                        expected: "a positive number of seconds",
                        value: raw,
                    })
                }
            },
            None => defaults.cache_ttl_secs,
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            coingecko_api_url: get("COINGECKO_API_URL").unwrap_or(defaults.coingecko_api_url),
            cache_ttl_secs,
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN"),
            voice: VoiceConfig {
                api_key: get("LIVEKIT_API_KEY"),
                api_secret: get("LIVEKIT_API_SECRET"),
                url: get("LIVEKIT_URL"),
            },
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// Out-of-range values (only possible when the struct is built by hand)
    /// fall back to the default TTL.
    pub fn cache_ttl(&self) -> Duration {
        Duration::try_seconds(self.cache_ttl_secs)
            .filter(|ttl| *ttl > Duration::zero())
            .unwrap_or_else(|| Duration::seconds(common::DEFAULT_TTL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_address(), ("127.0.0.1".to_string(), 8080));
        assert_eq!(config.cache_ttl(), Duration::seconds(60));
        assert!(!config.voice.is_enabled());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "3001"),
            ("COINGECKO_API_URL", "http://localhost:9000/api/v3"),
            ("CACHE_TTL_SECS", "5"),
            ("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 3001));
        assert_eq!(config.coingecko_api_url, "http://localhost:9000/api/v3");
        assert_eq!(config.cache_ttl_secs, 5);
        assert_eq!(config.cors_allowed_origin.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "  "), ("HOST", "")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, DEFAULT_HOST);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                expected: "a port number",
                value: "eighty".into()
            }
        );
        assert!(config_from(&[("CACHE_TTL_SECS", "0")]).is_err());
        assert!(config_from(&[("CACHE_TTL_SECS", "-3")]).is_err());
    }

    #[test]
    fn rejects_ttl_beyond_duration_range() {
        let err = config_from(&[("CACHE_TTL_SECS", "10000000000000000")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "CACHE_TTL_SECS", .. }));

        let config = config_from(&[("CACHE_TTL_SECS", "86400")]).unwrap();
        assert_eq!(config.cache_ttl(), Duration::days(1));

        let hand_built = AppConfig {
            cache_ttl_secs: i64::MAX,
            ..AppConfig::default()
        };
        assert_eq!(hand_built.cache_ttl(), Duration::seconds(60));
    }

    #[test]
    fn voice_needs_all_three_credentials() {
        let partial = config_from(&[("LIVEKIT_API_KEY", "key"), ("LIVEKIT_URL", "wss://voice")]).unwrap();
        assert!(!partial.voice.is_enabled());
        assert_eq!(partial.voice.missing(), vec!["LIVEKIT_API_SECRET"]);

        let full = config_from(&[
            ("LIVEKIT_API_KEY", "key"),
            ("LIVEKIT_API_SECRET", "secret"),
            ("LIVEKIT_URL", "wss://voice"),
        ])
        .unwrap();
        assert!(full.voice.is_enabled());
    }
}
