//! # System Interaction Layer
//!
//! Everything that touches the operating system lives here.
//!
//! ## Modules
//!
//! - **`executor`**: the command runner. Spawns one host-shell process per call,
//!   captures its output and answers interactive prompts when it goes quiet.
//! - **`shell`**: builds the host-shell invocation (`sh -c` / `cmd /C`).
//! - **`sink`**: the status stream written by the runner and the pipeline.
//! - **`fs_ops`** and **`archive`**: directory listing, removal and zipping used by
//!   stages and the `archive` step.
//! - **`signals`**: process-wide exit on interrupt/terminate signals.

pub mod archive;
pub mod executor;
pub mod fs_ops;
pub mod shell;
pub mod signals;
pub mod sink;
