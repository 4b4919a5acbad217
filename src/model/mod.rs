pub mod config;
pub mod grid;
pub mod region;
pub mod speech;

pub use config::*;
pub use grid::*;
pub use region::*;
pub use speech::*;
