//! What the page and email editors offer: sections listing the tokens that
//! can be inserted, and the criteria for choosing an A/B test winner.

mod abtest;

use serde_json::json;
use tracing::debug;

use crate::error::Result;
use crate::rendering::{LinkKind, LANGBAR, SHAREBUTTONS};
use crate::services::{PageRepository, Templating, TranslationLookup};
use crate::templating::{TOKEN_EXTRA_TEMPLATE, TOKEN_INDEX_TEMPLATE};

pub use abtest::{AbTestCriterion, AbTestKind, VariantStats};

/// A block of insertable tokens shown in an editor's sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSection {
    pub key: &'static str,
    pub header: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBuild {
    pub sections: Vec<TokenSection>,
    pub criteria: Vec<AbTestCriterion>,
}

/// Tokens and winner criteria for the page editor.
pub fn page_build(
    pages: &dyn PageRepository,
    translator: &dyn TranslationLookup,
    templates: &dyn Templating,
) -> Result<PageBuild> {
    let extra = templates.render(
        TOKEN_EXTRA_TEMPLATE,
        &json!({
            "tokens": [
                { "token": LANGBAR, "label": translator.translate("page.token.lang") },
                { "token": SHAREBUTTONS, "label": translator.translate("page.token.share") },
            ]
        }),
    )?;

    let sections = vec![
        TokenSection {
            key: "page.extratokens",
            header: "page.builder.header.extra",
            content: extra,
        },
        TokenSection {
            key: "page.pagetokens",
            header: "page.builder.header.index",
            content: page_index(pages, translator, templates)?,
        },
    ];

    Ok(PageBuild {
        sections,
        criteria: AbTestCriterion::all(),
    })
}

/// Tokens for the email editor. Emails get page links but neither a
/// language bar nor share buttons.
pub fn email_build(
    pages: &dyn PageRepository,
    translator: &dyn TranslationLookup,
    templates: &dyn Templating,
) -> Result<Vec<TokenSection>> {
    Ok(vec![TokenSection {
        key: "page.emailtokens",
        header: "page.builder.header.index",
        content: page_index(pages, translator, templates)?,
    }])
}

fn page_index(
    pages: &dyn PageRepository,
    translator: &dyn TranslationLookup,
    templates: &dyn Templating,
) -> Result<String> {
    let pages = pages.all()?;
    debug!("Listing {} page tokens", pages.len());

    let entries: Vec<serde_json::Value> = pages
        .iter()
        .map(|page| {
            json!({
                "token": LinkKind::Page.placeholder(&page.id.to_string()),
                "title": page.title,
            })
        })
        .collect();

    templates.render(
        TOKEN_INDEX_TEMPLATE,
        &json!({
            "pages": entries,
            "empty": translator.translate("page.builder.index.empty"),
        }),
    )
}
