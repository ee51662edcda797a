pub mod product;
pub mod customer;
pub mod booking;

pub use product::*;
pub use customer::*;
pub use booking::*;
