//! A site held in memory, loaded from a JSON file. It backs the command
//! line tool, and implements every service the renderers and the
//! dashboard need.

mod stats;

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::content::{Clickthrough, Page, Redirect};
use crate::error::{Error, Result};
use crate::services::{
    PageRepository, RedirectRepository, Router, SocialShareProvider, TranslationLookup,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    #[serde(default = "default_routes")]
    pub routes: BTreeMap<String, String>,
    #[serde(default = "default_redirect_path")]
    pub redirect_path: String,
}

fn default_routes() -> BTreeMap<String, String> {
    BTreeMap::from([(
        "page_action".to_string(),
        "/s/pages/{objectAction}/{objectId}".to_string(),
    )])
}

fn default_redirect_path() -> String {
    "/r/".to_string()
}

/// A single recorded page view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Hit {
    pub page_id: u64,
    pub date: NaiveDate,
    #[serde(default)]
    pub lead_id: Option<u64>,
    #[serde(default)]
    pub dwell_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Site {
    pub settings: Settings,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub redirects: Vec<Redirect>,
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
    #[serde(default)]
    pub share_buttons: BTreeMap<String, String>,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

impl Site {
    /// Read and parse a site file.
    pub fn load(filename: &Path) -> Result<Site> {
        let content = match std::fs::read_to_string(filename) {
            Ok(content) => content,
            Err(error) => {
                debug!(?error);
                return Err(Error::Io {
                    path: filename.to_path_buf(),
                    source: error,
                });
            }
        };

        Site::parse(filename, &content)
    }

    /// Parse the contents of a site file. The filename is only used to
    /// describe problems.
    pub fn parse(filename: &Path, content: &str) -> Result<Site> {
        let site: Site = serde_json::from_str(content).map_err(|source| Error::Site {
            path: filename.to_path_buf(),
            source,
        })?;

        // fail now rather than on the first generated link
        site.base()?;

        debug!(
            "Loaded {} pages, {} redirects, {} hits",
            site.pages
                .len(),
            site.redirects
                .len(),
            site.hits
                .len()
        );

        Ok(site)
    }

    pub fn page(&self, id: u64) -> Option<&Page> {
        self.pages
            .iter()
            .find(|page| page.id == id)
    }

    fn base(&self) -> Result<Url> {
        let mut base = self
            .settings
            .base_url
            .clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Url::parse(&base)?)
    }

    /// Build a URL below the base, with the clickthrough attached as a
    /// query parameter. Relative URLs keep only the path and query.
    fn build_url(
        &self,
        path: &str,
        absolute: bool,
        clickthrough: Option<&Clickthrough>,
    ) -> Result<String> {
        let mut url = self
            .base()?
            .join(path.trim_start_matches('/'))?;

        if let Some(clickthrough) = clickthrough {
            let encoded = serde_json::to_string(clickthrough)?;
            url.query_pairs_mut()
                .append_pair("ct", &encoded);
        }

        if absolute {
            return Ok(url.to_string());
        }

        match url.query() {
            Some(query) => Ok(format!("{}?{}", url.path(), query)),
            None => Ok(url
                .path()
                .to_string()),
        }
    }
}

impl PageRepository for Site {
    fn get(&self, id: u64) -> Result<Option<Page>> {
        Ok(self
            .page(id)
            .cloned())
    }

    fn generate_url(
        &self,
        page: &Page,
        absolute: bool,
        clickthrough: Option<&Clickthrough>,
    ) -> Result<String> {
        self.build_url(&page.alias, absolute, clickthrough)
    }

    fn all(&self) -> Result<Vec<Page>> {
        Ok(self
            .pages
            .clone())
    }
}

impl RedirectRepository for Site {
    fn get(&self, key: &str) -> Result<Option<Redirect>> {
        Ok(self
            .redirects
            .iter()
            .find(|redirect| redirect.id == key)
            .cloned())
    }

    fn generate_redirect_url(
        &self,
        redirect: &Redirect,
        clickthrough: Option<&Clickthrough>,
    ) -> Result<String> {
        let path = format!(
            "{}/{}",
            self.settings
                .redirect_path
                .trim_end_matches('/'),
            redirect.id
        );
        self.build_url(&path, true, clickthrough)
    }
}

impl TranslationLookup for Site {
    fn translate(&self, key: &str) -> String {
        match self
            .translations
            .get(key)
        {
            Some(text) => text.clone(),
            None => key.to_string(),
        }
    }
}

impl SocialShareProvider for Site {
    /// The configured button markup, with `{url}` replaced by the page's
    /// address, encoded for use in a query string.
    fn share_buttons(&self, page: &Page) -> Result<BTreeMap<String, String>> {
        let address = self.generate_url(page, true, None)?;
        let encoded: String = url::form_urlencoded::byte_serialize(address.as_bytes()).collect();

        Ok(self
            .share_buttons
            .iter()
            .map(|(network, markup)| (network.clone(), markup.replace("{url}", &encoded)))
            .collect())
    }
}

impl Router for Site {
    fn generate(&self, route: &str, params: &[(&str, &str)]) -> Result<String> {
        let pattern = self
            .settings
            .routes
            .get(route)
            .ok_or_else(|| Error::Repository(format!("no route named \"{}\"", route)))?;

        let mut path = pattern.clone();
        for (name, value) in params {
            path = path.replace(&format!("{{{}}}", name), value);
        }

        Ok(path)
    }
}
