//! Flat-file persistence for Staffdesk.
//!
//! Everything lives as JSON under the data directory: append-only journals
//! for chat turns and form submissions, and one editable site content
//! document.

pub mod content;
pub mod error;
pub mod flatten;
pub mod journal;

pub use content::ContentStore;
pub use error::StorageError;
pub use flatten::{flatten, unflatten};
pub use journal::{submission_record, timestamp, ChatLogEntry, Journal};
