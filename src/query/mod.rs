//! Query handling: classification of user input before lookup.

mod classify;

pub use classify::{classify, QueryKind};
