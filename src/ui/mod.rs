//! UI modules for the news window
//!
//! Drawing code only: every label and visibility rule comes from
//! `crate::view::PageView`.

pub mod components;
mod feed;
mod header;
pub mod theme;

pub use feed::render_feed;
pub use header::render_header;
