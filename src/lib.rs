pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::ServiceConfig;
pub use core::search::SearchService;
pub use server::{build_state, run_server, serve};
pub use utils::error::{GistError, Result};
