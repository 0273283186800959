//! Daily-note navigation companion for a SiYuan-compatible kernel
//!
//! This library resolves, locates, and (if absent) creates daily notes
//! (documents whose identity is a calendar date) relative to the document
//! the user is navigating from, with a deterministic notebook-selection
//! policy for new notes.

mod cli;
mod config;
mod create;
mod date;
mod errors;
mod extract;
mod helper;
mod kernel;
mod locate;
mod navigate;
mod resolve;
mod template;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use create::*;
pub use date::*;
pub use errors::*;
pub use extract::*;
pub use helper::*;
pub use kernel::*;
pub use locate::*;
pub use navigate::*;
pub use resolve::*;
pub use template::*;
pub use types::*;
