//! Recognizing and replacing placeholder tokens in HTML

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{NoExpand, Regex, RegexBuilder};

use crate::error::Result;

pub const LANGBAR: &str = "{langbar}";
pub const SHAREBUTTONS: &str = "{sharebuttons}";

macro_rules! compile {
    ($pattern:expr) => {{
        static REGEX: OnceLock<Regex> = OnceLock::new();
        REGEX.get_or_init(|| Regex::new($pattern).unwrap_or_else(|e| panic!("{}", e)))
    }};
}

macro_rules! compile_ignore_case {
    ($pattern:expr) => {{
        static REGEX: OnceLock<Regex> = OnceLock::new();
        REGEX.get_or_init(|| {
            RegexBuilder::new($pattern)
                .case_insensitive(true)
                .build()
                .unwrap_or_else(|e| panic!("{}", e))
        })
    }};
}

/// Tokens that carry an identifier and resolve to a tracked URL.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Page,     // {pagelink=ID}
    External, // {externallink=ID}
}

impl LinkKind {
    pub fn name(self) -> &'static str {
        match self {
            LinkKind::Page => "pagelink",
            LinkKind::External => "externallink",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            LinkKind::Page => compile!(r"\{pagelink=(.*?)\}"),
            LinkKind::External => compile!(r"\{externallink=(.*?)\}"),
        }
    }

    /// The literal placeholder text for the given identifier.
    pub fn placeholder(self, id: &str) -> String {
        format!("{{{}={}}}", self.name(), id)
    }
}

/// Find the distinct identifiers used by tokens of the given kind, in the
/// order they first appear. The identifier runs up to the next closing
/// brace; an unterminated token is not a match.
pub fn scan(kind: LinkKind, html: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for captures in kind
        .pattern()
        .captures_iter(html)
    {
        let id = &captures[1];
        if !found
            .iter()
            .any(|existing| existing == id)
        {
            found.push(id.to_string());
        }
    }

    found
}

pub fn contains_ignore_case(html: &str, token: &str) -> Result<bool> {
    if token.is_empty() {
        return Ok(false);
    }

    Ok(ignoring_case(token)?.is_match(html))
}

/// Replace every occurrence of `token` in `html`, without regard to case.
/// The replacement is inserted literally. Borrows the input when there is
/// nothing to replace.
pub fn replace_ignore_case<'h>(html: &'h str, token: &str, replacement: &str) -> Result<Cow<'h, str>> {
    if token.is_empty() {
        return Ok(Cow::Borrowed(html));
    }

    Ok(ignoring_case(token)?.replace_all(html, NoExpand(replacement)))
}

fn ignoring_case(token: &str) -> Result<Cow<'static, Regex>> {
    match token {
        LANGBAR => Ok(Cow::Borrowed(compile_ignore_case!(r"\{langbar\}"))),
        SHAREBUTTONS => Ok(Cow::Borrowed(compile_ignore_case!(r"\{sharebuttons\}"))),
        _ => {
            let regex = RegexBuilder::new(&regex::escape(token))
                .case_insensitive(true)
                .build()?;
            Ok(Cow::Owned(regex))
        }
    }
}
