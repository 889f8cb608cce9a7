// Types describing the content that tokens are substituted into

mod types;

// Re-export all public symbols
pub use types::*;
