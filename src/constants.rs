// src/constants.rs

use std::time::Duration;

/// The name of the directory (inside the system config dir) holding tutor settings.
pub const CONFIG_DIR_NAME: &str = "tutorial";

/// The name of the configuration file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILENAME: &str = "config.toml";

/// How long a subprocess must stay silent on stdout before it is assumed to wait for input.
pub const DEFAULT_IDLE_THRESHOLD: Duration = Duration::from_millis(1000);

/// How often the prompt feeder re-evaluates the subprocess state.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Defaults fed to the Langium generator prompts.
pub const DEFAULT_PROJECT_NAME: &str = "ErrorMathTutorial";
pub const DEFAULT_LANGUAGE_NAME: &str = "Error Math";
pub const DEFAULT_FILE_EXTENSION: &str = ".errmath";

/// Environment variable through which step scripts receive the generated project folder.
pub const PROJECT_ENV_VAR: &str = "TUTORIAL_PROJECT";

/// Exit code used when the process is stopped by a signal.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;
