use firewrite_core::{ActionInputs, ConfigError};
use firewrite_firebase::EmulatorHosts;

use crate::workflow::EnvInputs;

/// Everything one invocation needs, gathered from the environment.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    pub inputs: ActionInputs,
    pub emulators: EmulatorHosts,
}

impl ActionConfig {
    /// Load the action inputs (`INPUT_*`) and emulator hosts.
    ///
    /// Fails on the first missing or invalid input; nothing has touched
    /// the network at that point.
    pub fn from_env() -> Result<Self, ConfigError> {
        let inputs = ActionInputs::read(&EnvInputs)?;
        let emulators = EmulatorHosts::from_env();
        if emulators != EmulatorHosts::default() {
            tracing::info!(?emulators, "Emulator hosts configured");
        }
        Ok(Self { inputs, emulators })
    }
}
