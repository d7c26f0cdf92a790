//! tmplhtml - rename `.tmpl` templates to `.html`
//!
//! Walks a directory tree and renames every regular file whose name ends in
//! `.tmpl` to the same name ending in `.html`, in the same directory.
//!
//! # Example
//!
//! ```ignore
//! use tmplhtml::{RenameOptions, Renamer};
//!
//! let renamer = Renamer::new("site/templates", RenameOptions::default())?;
//! let report = renamer.run(&mut std::io::stdout())?;
//! println!("{} renamed", report.renamed.len());
//! ```

pub mod cli;
pub mod config;
mod error;
mod renamer;

pub use error::RenameError;
pub use renamer::{ConflictPolicy, Rename, RenameOptions, RenameReport, Renamer, target_file_name, target_name};

/// Suffix that marks a file as a rename candidate
pub const TMPL_SUFFIX: &str = ".tmpl";

/// Suffix that replaces [`TMPL_SUFFIX`]
pub const HTML_SUFFIX: &str = ".html";

/// Prompt shown when no path is given on the command line
pub const PROMPT: &str = "Enter the path to the directory: ";

/// Message printed when the root is missing or not a directory
pub const INVALID_DIRECTORY: &str = "Invalid directory path.";
