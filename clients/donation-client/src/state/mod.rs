pub mod donation;
pub mod withdrawal;

pub use donation::*;
pub use withdrawal::*;
