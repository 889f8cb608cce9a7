//! Named templates for the markup this crate produces, rendered with
//! TinyTemplate.

mod builtin;

use tinytemplate::TinyTemplate;
use tracing::debug;

use crate::error::{Error, Result};
use crate::services::Templating;

pub use builtin::{
    CHART_TEMPLATE, LANGBAR_TEMPLATE, SHARE_BUTTON_STYLES_TEMPLATE, TABLE_TEMPLATE,
    TOKEN_EXTRA_TEMPLATE, TOKEN_INDEX_TEMPLATE,
};

/// The built-in templates, compiled once.
pub struct Templates {
    tt: TinyTemplate<'static>,
}

impl Templates {
    pub fn new() -> Result<Templates> {
        let mut tt = TinyTemplate::new();

        for (name, text) in builtin::ALL {
            tt.add_template(name, text)
                .map_err(|source| Error::Template {
                    name: name.to_string(),
                    source,
                })?;
        }

        Ok(Templates { tt })
    }
}

impl Templating for Templates {
    fn render(&self, name: &str, data: &serde_json::Value) -> Result<String> {
        debug!("Rendering template {}", name);

        self.tt
            .render(name, data)
            .map_err(|source| Error::Template {
                name: name.to_string(),
                source,
            })
    }
}
