//! Terminal viewer for the remote machines inventory.
//!
//! # Overview
//! Holds the view state (two input fields, the displayed records, the current
//! error), turns user actions into queries, and renders the result as a text
//! table. Requests are built and parsed by `machines-core`; this crate only
//! executes them and owns the state.
//!
//! # Design
//! - `App` is a single-threaded event loop over an mpsc channel. Only it
//!   mutates `ViewState`.
//! - Each query runs on its own worker thread through a `Transport` and posts
//!   its outcome back as an event. Outcomes are applied in arrival order.
//! - Every failure becomes a `QueryError`; nothing propagates out of the loop.

pub mod app;
pub mod command;
pub mod query;
pub mod render;
pub mod state;
pub mod transport;

pub use app::{App, Control, Event};
pub use query::{Query, QueryKind};
pub use render::{render, Page};
pub use state::{QueryError, ViewState, QUERY_ERROR_MESSAGE};
pub use transport::{Transport, UreqTransport};
