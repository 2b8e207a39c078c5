//! # outreach-client
//!
//! REST transport for the outreach admin application.
//!
//! This crate provides:
//! - [`ApiClient`] covering the recipient directory, template store and
//!   campaign send endpoints
//! - The canonical [`Page`] type and the normalization of the backend's
//!   inconsistent list-response shapes
//! - The [`PageFetcher`] contract the stateful core is written against
//! - Wire models mirroring the backend's JSON

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod api;
mod error;
mod model;
mod page;

pub use api::{ApiClient, RecipientPages, TemplatePages};
pub use error::{Error, Result};
pub use model::{
    Recipient, RecipientQuery, SendAllPayload, SendNewcomersPayload, SendOutcome,
    SendSelectedPayload, Template, TemplatePayload, TimeFrame,
};
pub use page::{Page, PageFetcher};
