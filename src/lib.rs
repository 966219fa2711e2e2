//! Pychron configuration manager.
//!
//! Provisions a Pychron working environment on a lab workstation: the
//! environment directory tree, setup files, preferences, example pyscripts,
//! the application source checkout, Python dependencies and an executable
//! launcher script.
//!
//! The public API is organised into four layers:
//!
//! - **[`templates`]**: the embedded template catalogue and its renderer
//! - **[`resources`]**: idempotent filesystem primitives and the file materializer
//! - **[`steps`]**: named provisioning steps wired to templates and external tools
//! - **[`commands`]**: subcommand orchestration (single steps and the wizard)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod prompt;
pub mod resources;
pub mod settings;
pub mod steps;
pub mod templates;
