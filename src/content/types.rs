//! Pages, redirects, leads, and the attribution data threaded through
//! generated URLs.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The HTML of a page or email, keyed by slot name.
pub type ContentSlots = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: u64,
    pub title: String,
    pub alias: String,
    pub language: String,
    #[serde(default)]
    pub translation_parent: Option<u64>,
    #[serde(default)]
    pub translation_children: Vec<u64>,
}

impl Page {
    /// Whether this page belongs to a translation group at all, either as
    /// the parent of other pages or as a child of one.
    pub fn is_translated(&self) -> bool {
        self.translation_parent
            .is_some()
            || !self
                .translation_children
                .is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lead {
    pub id: u64,
}

/// The entity a click originated from, serialized as `[kind, id]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source(pub String, pub u64);

impl Source {
    pub fn new(kind: &str, id: u64) -> Source {
        Source(kind.to_string(), id)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| format!("expected KIND:ID, found \"{}\"", s))?;

        let kind = kind.trim();
        if kind.is_empty() {
            return Err(format!("missing source kind in \"{}\"", s));
        }

        let id = id
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("invalid source id in \"{}\": {}", s, e))?;

        Ok(Source::new(kind, id))
    }
}

/// Attribution data attached to tracked URLs so that a later hit can be
/// traced back to the page or email (and lead) it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Clickthrough {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<u64>,
}

impl Clickthrough {
    pub fn page(page: &Page) -> Clickthrough {
        Clickthrough {
            source: Some(Source::new("page", page.id)),
            lead: None,
        }
    }

    pub fn email(source: Source, lead: Option<&Lead>) -> Clickthrough {
        Clickthrough {
            source: Some(source),
            lead: lead.map(|lead| lead.id),
        }
    }
}

/// One entry in a language bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageRelation {
    pub page_id: u64,
    pub lang: String,
    pub url: String,
}
