#[macro_use]
mod macros;
mod wizard_client;

pub use wizard_client::*;
