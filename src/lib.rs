//! # header-keeper
//!
//! Keeps license and copyright header comments in a source tree consistent.
//!
//! `header-keeper` classifies each file by its comment dialect, renders a
//! license header in that dialect's comment syntax and then either inserts it
//! or rewrites the header that is already there. Existing headers are found via
//! the `@LICENSE_HEADER_START@` / `@LICENSE_HEADER_END@` sentinel markers, so
//! running the tool twice yields the same content and files that are already up
//! to date are never rewritten.
//!
//! ## Features
//!
//! * Built-in comment dialects for C/C++, Ruby, Shell, XML and CMake, plus custom dialects from a config file
//! * Full header replacement or license-only replacement that keeps the surrounding metadata comment
//! * Missing-only mode that adds headers where none exist and leaves the rest alone
//! * Author extraction from existing `Copyright (c)` lines
//! * Simulate mode, diffs, and JSON / CSV reports
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use header_keeper::processor::{Processor, ProcessorConfig, UpdateMode};
//! use header_keeper::templates::{Author, LicenseData, TemplateManager};
//!
//! fn main() -> anyhow::Result<()> {
//!     let template_manager = TemplateManager::builtin("MIT")?;
//!     let license_data = LicenseData {
//!         license: template_manager.license_name().to_string(),
//!         year: "2024".to_string(),
//!         authors: vec![Author::new("Jane Doe", "2024")],
//!         company: Some("Acme".to_string()),
//!     };
//!
//!     let processor = Processor::new(ProcessorConfig {
//!         mode: UpdateMode::MissingOnly,
//!         recursive: true,
//!         simulate: true,
//!         ..ProcessorConfig::new(template_manager, license_data)
//!     })?;
//!
//!     let report = processor.process(&["src".to_string()])?;
//!     println!("{} file(s) would change", report.summary.files_changed());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`dialect`] - Comment dialects and file classification
//! * [`renderer`] - Wrapping rendered text in comment syntax
//! * [`processor`] - Header detection, mutation and the per-run orchestration
//! * [`templates`] - License and metadata templates
//! * [`config`] - The `.header-keeper.toml` config file
//! * [`report`] - Per-file results and report generation
//! * [`logging`] - Logging utilities for verbose output

pub mod authors;
pub mod config;
pub mod dialect;
pub mod diff;
pub mod error;
pub mod license_detection;
pub mod logging;
pub mod output;
pub mod processor;
pub mod renderer;
pub mod report;
pub mod templates;
