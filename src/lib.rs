//! @ai:module:intent Personal-best statistics engine for timed-attempt logs
//! @ai:module:layer domain
//! @ai:module:public_api attempt, window, progression, category, export, dates, output, config, error
//! @ai:module:stateless true
//!
//! # cubestats
//!
//! Computes best singles, best rolling averages (ao3 .. ao100, trimmed for
//! windows of five or more) and the chronological history of personal
//! records from a timer export, optionally as of a cutoff date.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cubestats::{export, output, Statistic, STANDARD_WINDOWS};
//! use std::path::Path;
//!
//! let set = export::read_export(Path::new("times.json"))
//!     .unwrap()
//!     .into_categories(STANDARD_WINDOWS.to_vec(), cubestats::OK_CODE);
//!
//! let summaries = set.summaries(None);
//! println!("{}", output::format_summaries(&summaries, set.windows(), output::OutputFormat::Text));
//!
//! if let Some(category) = set.get("3x3") {
//!     let history = category.history(Statistic::Average(5), None);
//!     println!("{} ao5 records", history.len());
//! }
//! ```

pub mod attempt;
pub mod category;
pub mod config;
pub mod dates;
pub mod error;
pub mod export;
pub mod output;
pub mod progression;
pub mod window;

pub use attempt::{normalize, normalize_with, Attempt, OK_CODE};
pub use category::{aggregate, Category, CategorySet, CategorySummary, WindowBest};
pub use config::Config;
pub use error::{Error, Result};
pub use export::{parse_export, read_export, Export};
pub use output::{format_duration, format_history, format_summaries, OutputFormat};
pub use progression::{progression, progression_for_kind, Milestone};
pub use window::{
    best_of, best_single, best_window_average, window_average, Statistic, STANDARD_WINDOWS,
};
