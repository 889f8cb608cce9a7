//! Dynamic tokens for landing pages and emails, and the data behind the page
//! dashboard widgets.

pub mod builder;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod rendering;
pub mod services;
pub mod site;
pub mod templating;

pub use error::{Error, Result};
