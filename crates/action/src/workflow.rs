//! Runner-host integration for GitHub Actions.
//!
//! Inputs arrive as `INPUT_<NAME>` environment variables and failures are
//! reported with the `::error::` workflow command on stdout.

use std::io::Write;
use std::process::ExitCode;

use firewrite_core::InputSource;
use firewrite_firebase::WriteReceipt;

use crate::error::ActionError;

/// Prefix the runner puts in front of every input variable.
pub const INPUT_PREFIX: &str = "INPUT_";

/// Set to `1` by the runner when step debug logging is enabled.
pub const ENV_RUNNER_DEBUG: &str = "RUNNER_DEBUG";

/// [`InputSource`] reading the runner's `INPUT_*` variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvInputs;

impl InputSource for EnvInputs {
    fn raw(&self, name: &str) -> Option<String> {
        std::env::var(input_env_name(name)).ok()
    }
}

/// Environment variable holding input `name`, e.g. `databaseType` →
/// `INPUT_DATABASETYPE`.
pub fn input_env_name(name: &str) -> String {
    format!("{INPUT_PREFIX}{}", name.replace(' ', "_").to_uppercase())
}

pub fn is_debug() -> bool {
    std::env::var(ENV_RUNNER_DEBUG).is_ok_and(|v| v == "1")
}

/// Escape a workflow command message so it stays on one line.
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// The `::error::` command line for `message`.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Report a failure on the runner's failure channel.
pub fn set_failed(out: &mut impl Write, message: &str) -> std::io::Result<()> {
    writeln!(out, "{}", error_command(message))
}

/// Turn the run's result into the process exit code, reporting any
/// failure on `out`.
pub fn finish(result: Result<WriteReceipt, ActionError>, out: &mut impl Write) -> ExitCode {
    match result {
        Ok(receipt) => {
            tracing::info!(
                kind = %receipt.kind,
                location = %receipt.location,
                "Value written",
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "Action failed");
            if let Err(io) = set_failed(out, &e.to_string()) {
                tracing::warn!(error = %io, "Failed to write the failure report");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firewrite_core::DatabaseKind;
    use firewrite_firebase::WriteError;

    #[test]
    fn input_names_map_to_env_vars() {
        assert_eq!(input_env_name("credentials"), "INPUT_CREDENTIALS");
        assert_eq!(input_env_name("databaseType"), "INPUT_DATABASETYPE");
        assert_eq!(input_env_name("my input"), "INPUT_MY_INPUT");
    }

    #[test]
    fn error_command_escapes_newlines_and_percent() {
        assert_eq!(
            error_command("100% broken\nsecond line\r"),
            "::error::100%25 broken%0Asecond line%0D"
        );
    }

    #[test]
    fn plain_messages_pass_through() {
        assert_eq!(error_command("boom"), "::error::boom");
    }

    #[test]
    fn success_exits_zero_without_a_report() {
        let mut out = Vec::new();
        let code = finish(
            Ok(WriteReceipt {
                kind: DatabaseKind::Realtime,
                location: "a/b".into(),
            }),
            &mut out,
        );
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.is_empty());
    }

    #[test]
    fn failure_exits_non_zero_and_reports_the_error() {
        let mut out = Vec::new();
        let code = finish(
            Err(ActionError::from(WriteError::Rejected {
                status: 403,
                body: "Permission denied\nfor a/b".into(),
            })),
            &mut out,
        );
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "::error::Database rejected the write (403): Permission denied%0Afor a/b\n"
        );
    }
}
