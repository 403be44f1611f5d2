//! Notify Relay binary entrypoint.
//!
//! Usage: `relay-notifier [EVENT_JSON_FILE]`. Prints the invocation result as
//! JSON and exits non-zero when the notification was not delivered.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use relay_common::config::AppConfig;
use relay_notifier::NotifyHandler;
use relay_secrets::FileSecretStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay_notifier=info,relay_secrets=info".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;

    let event = match std::env::args().nth(1) {
        Some(path) => read_event(Path::new(&path))?,
        None => serde_json::json!({}),
    };

    // Credentials are resolved once; failure aborts before any send attempt
    let store = FileSecretStore::new(config.secrets_dir.clone());
    let handler = NotifyHandler::from_store(config, store)?;

    let result = handler.handle(&event).await;
    println!("{}", serde_json::to_string(&result)?);

    if !result.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

fn read_event(path: &Path) -> anyhow::Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read event file {}: {}", path.display(), e))?;
    serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("event file {} is not valid JSON: {}", path.display(), e))
}
