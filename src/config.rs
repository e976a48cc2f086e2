use std::{env, str::FromStr, time::Duration};

use anyhow::{Context, Result, anyhow};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ADMIN_SECRET: &str = "VIS-BEST";
const DEFAULT_SCHOOL_NAME: &str = "Vinayak International School";
const DEFAULT_SCHOOL_LOCATION: &str = "Hathras";
const DEFAULT_UNLOCK_WINDOW_MS: u64 = 2000;
const DEFAULT_UNLOCK_CLICKS: u32 = 3;
const DEFAULT_SESSION_IDLE_MINUTES: u64 = 720;
const DEFAULT_SWEEP_INTERVAL_MINUTES: u64 = 15;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub port: u16,
    pub admin_secret: String,
    pub school_name: String,
    pub school_location: String,
    pub unlock_window: Duration,
    pub unlock_clicks: u32,
    pub session_idle: Duration,
    pub sweep_interval: Duration,
    pub max_upload_bytes: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            admin_secret: DEFAULT_ADMIN_SECRET.to_string(),
            school_name: DEFAULT_SCHOOL_NAME.to_string(),
            school_location: DEFAULT_SCHOOL_LOCATION.to_string(),
            unlock_window: Duration::from_millis(DEFAULT_UNLOCK_WINDOW_MS),
            unlock_clicks: DEFAULT_UNLOCK_CLICKS,
            session_idle: Duration::from_secs(DEFAULT_SESSION_IDLE_MINUTES * 60),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_MINUTES * 60),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Missing keys
    /// fall back to defaults; present but unparsable values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SiteConfig::default();

        let admin_secret = lookup("SITE_ADMIN_SECRET").unwrap_or(defaults.admin_secret);
        if admin_secret.is_empty() {
            return Err(anyhow!("SITE_ADMIN_SECRET must not be empty"));
        }

        let unlock_clicks = parse_or(&lookup, "SITE_UNLOCK_CLICKS", DEFAULT_UNLOCK_CLICKS)?;
        if unlock_clicks == 0 {
            return Err(anyhow!("SITE_UNLOCK_CLICKS must be at least 1"));
        }

        let unlock_window_ms = parse_or(&lookup, "SITE_UNLOCK_WINDOW_MS", DEFAULT_UNLOCK_WINDOW_MS)?;
        let idle_minutes = parse_or(
            &lookup,
            "SITE_SESSION_IDLE_MINUTES",
            DEFAULT_SESSION_IDLE_MINUTES,
        )?;
        let sweep_minutes = parse_or(
            &lookup,
            "SITE_SWEEP_INTERVAL_MINUTES",
            DEFAULT_SWEEP_INTERVAL_MINUTES,
        )?;
        if sweep_minutes == 0 {
            return Err(anyhow!("SITE_SWEEP_INTERVAL_MINUTES must be at least 1"));
        }

        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            admin_secret,
            school_name: lookup("SITE_SCHOOL_NAME")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.school_name),
            school_location: lookup("SITE_SCHOOL_LOCATION")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.school_location),
            unlock_window: Duration::from_millis(unlock_window_ms),
            unlock_clicks,
            session_idle: Duration::from_secs(idle_minutes * 60),
            sweep_interval: Duration::from_secs(sweep_minutes * 60),
            max_upload_bytes: parse_or(&lookup, "SITE_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = SiteConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.admin_secret, "VIS-BEST");
        assert_eq!(config.unlock_window, Duration::from_millis(2000));
        assert_eq!(config.unlock_clicks, 3);
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            ("PORT", "3000"),
            ("SITE_ADMIN_SECRET", "s3cret"),
            ("SITE_UNLOCK_WINDOW_MS", "1500"),
            ("SITE_SESSION_IDLE_MINUTES", "30"),
            ("SITE_SCHOOL_NAME", "Green Valley School"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.admin_secret, "s3cret");
        assert_eq!(config.unlock_window, Duration::from_millis(1500));
        assert_eq!(config.session_idle, Duration::from_secs(1800));
        assert_eq!(config.school_name, "Green Valley School");
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = SiteConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(format!("{err}").contains("PORT"));

        let err = SiteConfig::from_lookup(lookup_from(&[("SITE_UNLOCK_CLICKS", "0")])).unwrap_err();
        assert!(format!("{err}").contains("SITE_UNLOCK_CLICKS"));
    }
}
