pub mod relative;
pub mod text;

pub use relative::{RelativeIndexError, next_element, previous_element, relative_element, relative_index};
pub use text::limit_text;
