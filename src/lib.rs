//! pinview
//!
//! TUI viewer for chat transcripts that keeps a preview of the latest user
//! request pinned to the top of the screen while the transcript scrolls.
//!
//! Pure Core / Impure Shell: the sticky engine, row geometry, and scroll
//! handling are pure and fully testable; terminal IO lives in `view`.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod sticky;
pub mod view;
