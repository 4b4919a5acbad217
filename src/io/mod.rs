pub mod config_io;
pub mod document;

pub use config_io::ConfigError;
pub use document::{DocumentError, GridDocument, RoundDocument, SpeechDocument};
