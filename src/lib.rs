//! argtree - binds command-line arguments to a tree of typed configuration objects.
//!
//! Programs describe their configuration as objects that declare parameters:
//! flags, single values, lists and nested objects. The command line is read in
//! two passes. The tokenizer builds a provisional tree without knowing the
//! schema, so whether `--x y` assigns `y` to `x` stays open. The matcher then
//! walks that tree against the declared schema, decides every open question,
//! and leaves unconsumed arguments as free arguments (usually input files).
//! Configuration files in TOML feed the same matcher.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use argtree::{Application, binder::{ConfigObject, Params}};
//!
//! #[derive(Default)]
//! struct Options {
//!     level: u32,
//!     verbose: bool,
//! }
//!
//! impl ConfigObject for Options {
//!     fn type_name(&self) -> &str {
//!         "Options"
//!     }
//!
//!     fn declare<'a>(&'a mut self, params: &mut Params<'a>) {
//!         params
//!             .value("level", Some('l'), &mut self.level, "compression level")
//!             .flag("verbose", Some('v'), &mut self.verbose, "talk more");
//!     }
//! }
//!
//! let mut options = Options::default();
//! let app = Application::parse(&mut options, std::env::args())?;
//! for file in app.args() {
//!     println!("{file} at level {}", options.level);
//! }
//! # Ok::<(), argtree::ArgTreeError>(())
//! ```

/// Core error types and result aliases.
pub mod core;

/// Accumulated interpretation problems.
pub mod diagnostics;

/// Declared parameter schemas and schema description files.
pub mod schema;

/// Schema-free first pass over the command line.
pub mod tokenizer;

/// Schema-directed second pass.
pub mod matcher;

/// Typed adapters between matched values and fields.
pub mod params;

/// Config objects and value binding.
pub mod binder;

/// TOML configuration files as input.
pub mod source;

/// Help text rendering.
pub mod usage;

/// Command-line entry point.
pub mod application;

/// Logging setup for programs using argtree.
pub mod tracing_config;

pub use application::{Application, ApplicationBuilder};
/// Re-exported core types for convenience.
pub use crate::core::{ArgTreeError, Result};
