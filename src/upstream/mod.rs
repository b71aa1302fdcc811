pub mod client;
pub mod normalize;
pub mod types;

pub use client::*;
pub use normalize::*;
pub use types::*;
