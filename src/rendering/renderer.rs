//! Resolving tokens against the page, redirect, translation, and social
//! services.

use serde_json::json;
use tracing::{debug, info, warn};

use crate::content::{Clickthrough, ContentSlots, LanguageRelation, Lead, Page, Redirect, Source};
use crate::error::Result;
use crate::services::{
    PageRepository, RedirectRepository, SocialShareProvider, Templating, TranslationLookup,
};
use crate::templating::{LANGBAR_TEMPLATE, SHARE_BUTTON_STYLES_TEMPLATE};

use super::cache::{memoize, ResolutionCache};
use super::natural;
use super::tokens::{self, LinkKind, LANGBAR, SHAREBUTTONS};

/// Renders the tokens found in page and email content. The renderer holds
/// no state of its own; everything it looks up is remembered in the
/// [`ResolutionCache`] passed to each call.
pub struct TokenRenderer<'a> {
    pages: &'a dyn PageRepository,
    redirects: &'a dyn RedirectRepository,
    translator: &'a dyn TranslationLookup,
    social: &'a dyn SocialShareProvider,
    templates: &'a dyn Templating,
}

impl<'a> TokenRenderer<'a> {
    pub fn new(
        pages: &'a dyn PageRepository,
        redirects: &'a dyn RedirectRepository,
        translator: &'a dyn TranslationLookup,
        social: &'a dyn SocialShareProvider,
        templates: &'a dyn Templating,
    ) -> Self {
        TokenRenderer {
            pages,
            redirects,
            translator,
            social,
            templates,
        }
    }

    /// Render the content of a landing page: the language bar, the share
    /// buttons, and then any links, attributed to this page.
    pub fn render_page_content(
        &self,
        content: &ContentSlots,
        page: &Page,
        cache: &mut ResolutionCache,
    ) -> Result<ContentSlots> {
        info!("Rendering page {} ({} slots)", page.id, content.len());

        let clickthrough = Clickthrough::page(page);
        let mut rendered = ContentSlots::new();

        for (slot, html) in content {
            let mut html = html.clone();

            if tokens::contains_ignore_case(&html, LANGBAR)? {
                let langbar = self
                    .render_language_bar(page, cache)?
                    .unwrap_or_default();
                html = tokens::replace_ignore_case(&html, LANGBAR, &langbar)?.into_owned();
            }

            if tokens::contains_ignore_case(&html, SHAREBUTTONS)? {
                let buttons = self.render_social_share_buttons(page, cache)?;
                html = tokens::replace_ignore_case(&html, SHAREBUTTONS, &buttons)?.into_owned();
            }

            let html = self.resolve_link_tokens(&html, Some(&clickthrough), cache)?;
            rendered.insert(slot.clone(), html);
        }

        Ok(rendered)
    }

    /// Render the content of an email about to be sent or displayed. Only
    /// links are substituted, attributed to the given source and lead.
    pub fn render_email_content(
        &self,
        content: &ContentSlots,
        source: Source,
        lead: Option<&Lead>,
        cache: &mut ResolutionCache,
    ) -> Result<ContentSlots> {
        info!("Rendering email for {} ({} slots)", source, content.len());

        let clickthrough = Clickthrough::email(source, lead);
        let mut rendered = ContentSlots::new();

        for (slot, html) in content {
            let html = self.resolve_link_tokens(html, Some(&clickthrough), cache)?;
            rendered.insert(slot.clone(), html);
        }

        Ok(rendered)
    }

    /// Replace every `{pagelink=ID}` and then every `{externallink=ID}` with
    /// a tracked URL. Identifiers that don't resolve are replaced with the
    /// empty string.
    pub fn resolve_link_tokens(
        &self,
        html: &str,
        clickthrough: Option<&Clickthrough>,
        cache: &mut ResolutionCache,
    ) -> Result<String> {
        let mut html = html.to_string();

        for id in tokens::scan(LinkKind::Page, &html) {
            let url = match self.find_page(&id, cache)? {
                Some(page) => self
                    .pages
                    .generate_url(&page, true, clickthrough)?,
                None => {
                    debug!("No page for {}", LinkKind::Page.placeholder(&id));
                    String::new()
                }
            };
            html = tokens::replace_ignore_case(&html, &LinkKind::Page.placeholder(&id), &url)?
                .into_owned();
        }

        for id in tokens::scan(LinkKind::External, &html) {
            let url = match self.find_redirect(&id, cache)? {
                Some(redirect) => self
                    .redirects
                    .generate_redirect_url(&redirect, clickthrough)?,
                None => {
                    debug!("No redirect for {}", LinkKind::External.placeholder(&id));
                    String::new()
                }
            };
            html = tokens::replace_ignore_case(&html, &LinkKind::External.placeholder(&id), &url)?
                .into_owned();
        }

        Ok(html)
    }

    /// Render the list of translations of this page as a navigation bar.
    /// Returns `None` if the page isn't part of a translation group.
    pub fn render_language_bar(
        &self,
        page: &Page,
        cache: &mut ResolutionCache,
    ) -> Result<Option<String>> {
        if !page.is_translated() {
            return Ok(None);
        }

        memoize(&mut cache.langbars, page.id, "langbar", || {
            let relations = self.language_relations(page)?;
            if relations.is_empty() {
                return Ok(None);
            }

            let html = self
                .templates
                .render(LANGBAR_TEMPLATE, &json!({ "pages": relations }))?;
            Ok(Some(html))
        })
    }

    /// Render the share buttons of every configured social network. The
    /// first time this happens in a pass, the button styling is queued
    /// for the document head.
    pub fn render_social_share_buttons(
        &self,
        page: &Page,
        cache: &mut ResolutionCache,
    ) -> Result<String> {
        if let Some(content) = cache
            .share_buttons
            .get(&page.id)
        {
            return Ok(content.clone());
        }

        let buttons = self
            .social
            .share_buttons(page)?;

        let mut content = String::from("<div class='share-buttons'>\n");
        for html in buttons.values() {
            content.push_str(html);
        }
        content.push_str("</div>\n");

        if !cache.has_stylesheets() {
            let styles = self
                .templates
                .render(SHARE_BUTTON_STYLES_TEMPLATE, &json!({}))?;
            cache.include_stylesheet(styles);
        }

        cache
            .share_buttons
            .insert(page.id, content.clone());

        Ok(content)
    }

    /// The root of the page's translation group followed by each of its
    /// children, labelled and sorted by language.
    fn language_relations(&self, page: &Page) -> Result<Vec<LanguageRelation>> {
        let root = match page.translation_parent {
            Some(parent) => match self
                .pages
                .get(parent)?
            {
                Some(parent) => parent,
                None => {
                    warn!("Translation parent {} of page {} not found", parent, page.id);
                    page.clone()
                }
            },
            None => page.clone(),
        };

        let mut children = Vec::new();
        for id in &root.translation_children {
            match self
                .pages
                .get(*id)?
            {
                Some(child) => children.push(child),
                None => warn!("Translation child {} of page {} not found", id, root.id),
            }
        }

        if children.is_empty() {
            return Ok(Vec::new());
        }

        let mut relations = Vec::with_capacity(children.len() + 1);
        for member in std::iter::once(&root).chain(children.iter()) {
            relations.push(LanguageRelation {
                page_id: member.id,
                lang: self.language_label(&member.language),
                url: self
                    .pages
                    .generate_url(member, false, None)?,
            });
        }

        relations.sort_by(|a, b| {
            natural::compare_ignore_case(&a.lang, &b.lang)
                .then_with(|| {
                    a.lang
                        .cmp(&b.lang)
                })
                .then_with(|| {
                    a.page_id
                        .cmp(&b.page_id)
                })
        });

        Ok(relations)
    }

    fn language_label(&self, code: &str) -> String {
        let key = format!("lang.{}", code);
        let label = self
            .translator
            .translate(&key);

        if label == key {
            code.to_string()
        } else {
            label
        }
    }

    fn find_page(&self, id: &str, cache: &mut ResolutionCache) -> Result<Option<Page>> {
        memoize(&mut cache.pages, id.to_string(), "pagelink", || {
            match id
                .trim()
                .parse::<u64>()
            {
                Ok(number) => self
                    .pages
                    .get(number),
                Err(_) => Ok(None),
            }
        })
    }

    fn find_redirect(&self, key: &str, cache: &mut ResolutionCache) -> Result<Option<Redirect>> {
        memoize(&mut cache.redirects, key.to_string(), "externallink", || {
            self.redirects
                .get(key)
        })
    }
}
