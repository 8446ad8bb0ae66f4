//! IP tracker: classifies a query, looks it up, and publishes the result to
//! the user-facing state and the map.

mod pipeline;
mod state;

pub use pipeline::Tracker;
pub use state::TrackerState;
