//! The booking wizard as a plain state machine, independent of the actor
//! that hosts it.

mod error;
mod selection;
mod stage;
mod state;

pub use error::*;
pub use selection::*;
pub use stage::*;
pub use state::*;
