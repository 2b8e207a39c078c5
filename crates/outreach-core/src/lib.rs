//! # outreach-core
//!
//! Behavioral core of the outreach admin application.
//!
//! This crate provides:
//! - Incremental list loading for the recipient selection list
//! - Debounced search and date filtering with page-reset detection
//! - Manual recipient selection
//! - The campaign composer (targeting modes, validation, confirmation,
//!   send dispatch and result interpretation)
//! - The template library
//! - Page navigation for page-at-a-time lists
//!
//! Each screen owns its own loader/filter/selection instances; there is no
//! shared or global state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod campaign;
mod error;
pub mod filter;
pub mod loader;
pub mod pagination;
pub mod selection;
pub mod templates;

pub use campaign::{
    CampaignDraft, Composer, DEFAULT_NEWCOMER_DAYS, PendingSend, SendReport, TargetMode,
};
pub use error::{Error, Result, ValidationError};
pub use filter::{DebounceTimer, FilterSnapshot, FilterState, FilterTracker, SETTLE_PERIOD};
pub use loader::{IncrementalLoader, NEAR_END_THRESHOLD, RECIPIENT_PAGE_SIZE};
pub use pagination::{PageToken, Pager};
pub use selection::SelectionSet;
pub use templates::{TEMPLATES_PER_PAGE, TemplateLibrary};
