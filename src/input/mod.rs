pub mod keymap;

pub use keymap::{click_command, command_for};
