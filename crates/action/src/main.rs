//! `firewrite-action` -- write one value to Firebase from a CI job.
//!
//! Reads the action inputs, authenticates with the service account,
//! performs a single Realtime Database or Firestore write, and exits
//! non-zero on any failure.
//!
//! # Inputs (as `INPUT_<NAME>` environment variables)
//!
//! | Input          | Required             | Default                 |
//! |----------------|----------------------|-------------------------|
//! | `credentials`  | yes                  | --                      |
//! | `databaseType` | no                   | `realtime`              |
//! | `path`         | yes                  | --                      |
//! | `doc`          | for `firestore`      | --                      |
//! | `value`        | no                   | current timestamp (ms)  |
//! | `databaseUrl`  | no                   | project default RTDB    |

use std::process::ExitCode;

use firewrite_action::runner;
use firewrite_action::workflow;
use firewrite_action::{ActionConfig, ActionError};
use firewrite_firebase::WriteReceipt;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "firewrite_action=info,firewrite_firebase=info,firewrite_core=info";
const DEBUG_FILTER: &str = "firewrite_action=debug,firewrite_firebase=debug,firewrite_core=debug";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let default_filter = if workflow::is_debug() {
        DEBUG_FILTER
    } else {
        DEFAULT_FILTER
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Processing");

    workflow::finish(execute().await, &mut std::io::stdout())
}

async fn execute() -> Result<WriteReceipt, ActionError> {
    let config = ActionConfig::from_env()?;
    runner::run(&config).await
}
