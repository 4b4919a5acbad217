pub mod input;
pub mod io;
pub mod logging;
pub mod model;
pub mod ops;
pub mod session;
pub mod util;
