//! Terminal UI module
//!
//! The interactive board lives here; one-shot commands print with `colored`
//! directly and do not go through this module.

mod board;

pub use board::BoardApp;
