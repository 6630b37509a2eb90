//! Per-invocation entry point: reads one HTTP event as JSON on stdin, writes
//! the response event as JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{error, info};

use placement_api::config::Config;
use placement_api::invoke::{handle_event, InvocationEvent, InvocationResponse};
use placement_api::logging::{self, LogTarget};
use placement_api::routes::build_app;
use placement_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    logging::init(&config, LogTarget::Stderr);

    let mut raw = String::new();
    tokio::io::stdin()
        .read_to_string(&mut raw)
        .await
        .context("failed to read invocation event from stdin")?;
    let event: InvocationEvent =
        serde_json::from_str(&raw).context("invocation event is not valid JSON")?;
    info!("Invocation {} {}", event.http_method, event.path);

    // Catalog is loaded per invocation.
    let state = AppState::from_config(&config).await?;

    let response = match handle_event(build_app(state), event, &config.function_path_prefix).await
    {
        Ok(response) => response,
        Err(e) => {
            error!("Invocation failed: {e:?}");
            InvocationResponse {
                status_code: 500,
                headers: [("content-type".to_string(), "application/json".to_string())].into(),
                body: r#"{"error":"Internal server error"}"#.to_string(),
                is_base64_encoded: false,
            }
        }
    };

    let mut out = serde_json::to_vec(&response)?;
    out.push(b'\n');
    let mut stdout = tokio::io::stdout();
    stdout.write_all(&out).await?;
    stdout.flush().await?;
    Ok(())
}
