use std::path::PathBuf;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Notification API endpoint (`POST` target)
    pub notify_url: String,

    /// Identifier of the secret holding the API token
    pub token_secret_name: String,

    /// Region passed to the secret store (default: us-east-1)
    pub region: String,

    /// Attempt budget per invocation, always > 0 (default: 3)
    pub max_tries: u32,

    /// Fixed wait between attempts in seconds (default: 1)
    pub wait_secs: u64,

    /// Opaque template identifier forwarded to the API
    pub template: String,

    /// Fallback receivers when the secret carries none
    pub receivers: Vec<String>,

    /// Default subject when the trigger event has none
    pub subject: String,

    /// Default body when the trigger event has none
    pub body: String,

    /// Hard timeout for a single send attempt in milliseconds (default: 1000)
    pub timeout_ms: u64,

    /// Root directory of the file-backed secret store
    pub secrets_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_tries: u32 = lookup("MAX_TRIES")
            .unwrap_or_else(|| "3".to_string())
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("MAX_TRIES must be a positive integer"))?;
        if max_tries == 0 {
            anyhow::bail!("MAX_TRIES must be greater than zero");
        }

        Ok(Self {
            notify_url: lookup("NOTIFY_URL")
                .ok_or_else(|| anyhow::anyhow!("NOTIFY_URL environment variable is required"))?,
            token_secret_name: lookup("TOKEN_SECRET_NAME").ok_or_else(|| {
                anyhow::anyhow!("TOKEN_SECRET_NAME environment variable is required")
            })?,
            region: lookup("AWS_DEFAULT_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            max_tries,
            wait_secs: lookup("WAIT_SECS")
                .unwrap_or_else(|| "1".to_string())
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("WAIT_SECS must be a non-negative integer"))?,
            template: lookup("TEMPLATE")
                .ok_or_else(|| anyhow::anyhow!("TEMPLATE environment variable is required"))?,
            receivers: lookup("RECEIVERS")
                .map(|raw| parse_receivers(&raw))
                .unwrap_or_default(),
            subject: lookup("SUBJECT").unwrap_or_default(),
            body: lookup("BODY").unwrap_or_default(),
            timeout_ms: lookup("NOTIFY_TIMEOUT_MS")
                .unwrap_or_else(|| "1000".to_string())
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("NOTIFY_TIMEOUT_MS must be a valid u64"))?,
            secrets_dir: lookup("SECRETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./secrets")),
        })
    }
}

/// Split a comma-separated receiver list, dropping blanks.
pub fn parse_receivers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("NOTIFY_URL", "https://api.example.com/notify"),
        ("TOKEN_SECRET_NAME", "prod/notify/token"),
        ("TEMPLATE", "alarm-v1"),
    ];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();
        assert_eq!(config.max_tries, 3);
        assert_eq!(config.wait_secs, 1);
        assert_eq!(config.timeout_ms, 1000);
        assert_eq!(config.region, "us-east-1");
        assert!(config.receivers.is_empty());
        assert_eq!(config.subject, "");
        assert_eq!(config.secrets_dir, PathBuf::from("./secrets"));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("MAX_TRIES", "5"),
            ("WAIT_SECS", "0"),
            ("RECEIVERS", "+15550100, +15550101,,"),
            ("AWS_DEFAULT_REGION", "eu-west-1"),
            ("SUBJECT", "Disk alarm"),
        ]);
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.max_tries, 5);
        assert_eq!(config.wait_secs, 0);
        assert_eq!(config.receivers, vec!["+15550100", "+15550101"]);
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.subject, "Disk alarm");
    }

    #[test]
    fn test_zero_attempt_budget_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("MAX_TRIES", "0"));
        let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("MAX_TRIES"));
    }

    #[test]
    fn test_negative_attempt_budget_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("MAX_TRIES", "-1"));
        assert!(AppConfig::from_lookup(lookup_from(&pairs)).is_err());
    }

    #[test]
    fn test_missing_required_variable() {
        let err = AppConfig::from_lookup(lookup_from(&REQUIRED[..2])).unwrap_err();
        assert!(err.to_string().contains("TEMPLATE"));
    }
}
