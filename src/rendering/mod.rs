//! Substitution of dynamic tokens into page and email content at display
//! or send time.

mod cache;
mod natural;
mod renderer;
mod tokens;

pub use cache::ResolutionCache;
pub use natural::compare_ignore_case;
pub use renderer::TokenRenderer;
pub use tokens::{contains_ignore_case, replace_ignore_case, scan, LinkKind, LANGBAR, SHAREBUTTONS};
