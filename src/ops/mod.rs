pub mod link;
pub mod merge;
pub mod navigate;
pub mod region_ops;
pub mod selection;

pub use link::{Link, LinkChange, LinkOutcome, Linker, Restyle, StylePool, StyleUnit};
pub use merge::{MergeError, MergeOutcome, common_column, merge};
pub use navigate::{Direction, NavigationError, neighbor};
pub use region_ops::Deletion;
pub use selection::{Selection, SelectionDelta};
