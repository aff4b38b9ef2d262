//! Pure field normalizers: free-text dates, event ids and whitespace cleanup.

pub mod date;
pub mod slug;
pub mod text;

pub use date::{DateNormalizer, DateSource};
pub use slug::{slugify, SlugGenerator};
pub use text::{clean_text, element_text};
