//! Helper functions for fragment markup
//!
//! Small HTML and URL builders shared by the block renderers.

mod html;
mod list;
mod url;

pub use html::*;
pub use list::*;
pub use url::*;
