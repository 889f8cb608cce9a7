#[cfg(test)]
mod verify {
    use page_tokens::content::ContentSlots;
    use page_tokens::rendering::{ResolutionCache, TokenRenderer};
    use page_tokens::templating::Templates;

    use crate::doubles::{page, Fixture};

    fn slots(entries: &[(&str, &str)]) -> ContentSlots {
        entries
            .iter()
            .map(|(slot, html)| (slot.to_string(), html.to_string()))
            .collect()
    }

    #[test]
    fn content_without_tokens_passes_through() {
        let fixture = Fixture::new().with_page(page(1, "en", None, vec![]));
        let templates = Templates::new().unwrap();
        let renderer = TokenRenderer::new(&fixture, &fixture, &fixture, &fixture, &templates);
        let mut cache = ResolutionCache::new();

        let content = slots(&[("main", "<h1>Hello</h1>"), ("aside", "")]);
        let rendered = renderer
            .render_page_content(&content, &page(1, "en", None, vec![]), &mut cache)
            .unwrap();

        assert_eq!(rendered, content);
        assert!(cache
            .stylesheets()
            .is_empty());
    }

    #[test]
    fn langbar_is_removed_from_untranslated_pages() {
        let fixture = Fixture::new().with_page(page(1, "en", None, vec![]));
        let templates = Templates::new().unwrap();
        let renderer = TokenRenderer::new(&fixture, &fixture, &fixture, &fixture, &templates);
        let mut cache = ResolutionCache::new();

        let content = slots(&[("main", "<header>{langbar}</header>")]);
        let rendered = renderer
            .render_page_content(&content, &page(1, "en", None, vec![]), &mut cache)
            .unwrap();

        assert_eq!(rendered["main"], "<header></header>");
    }

    #[test]
    fn block_tokens_in_any_case() {
        let fixture = Fixture::new()
            .with_page(page(1, "en", None, vec![2]))
            .with_page(page(2, "de", Some(1), vec![]))
            .with_button("twitter", "<a class=\"tw\">Tweet</a>");
        let templates = Templates::new().unwrap();
        let renderer = TokenRenderer::new(&fixture, &fixture, &fixture, &fixture, &templates);
        let mut cache = ResolutionCache::new();
        let current = page(1, "en", None, vec![2]);

        let content = slots(&[
            ("header", "{LangBar}"),
            ("main", "<p>{ShareButtons}</p><p>{SHAREBUTTONS}</p>"),
        ]);
        let rendered = renderer
            .render_page_content(&content, &current, &mut cache)
            .unwrap();

        assert!(rendered["header"].starts_with("<nav class=\"langbar\">"));
        assert!(rendered["header"].contains("<a href=\"/page-2\">de</a>"));

        let buttons = "<div class='share-buttons'>\n<a class=\"tw\">Tweet</a></div>\n";
        assert_eq!(
            rendered["main"],
            format!("<p>{}</p><p>{}</p>", buttons, buttons)
        );
        assert_eq!(fixture.share_requests.get(), 1);
        assert_eq!(cache.stylesheets().len(), 1);
    }

    #[test]
    fn every_token_in_every_slot() {
        let fixture = Fixture::new()
            .with_page(page(1, "en", None, vec![2]))
            .with_page(page(2, "de", Some(1), vec![]))
            .with_redirect("docs", "https://docs.example.org/")
            .with_button("facebook", "<a class=\"fb\">Share</a>")
            .with_button("twitter", "<a class=\"tw\">Tweet</a>");
        let templates = Templates::new().unwrap();
        let renderer = TokenRenderer::new(&fixture, &fixture, &fixture, &fixture, &templates);
        let mut cache = ResolutionCache::new();
        let current = page(1, "en", None, vec![2]);

        let content = slots(&[
            ("header", "{langbar}"),
            ("main", "<a href=\"{pagelink=2}\">Deutsch</a> {sharebuttons}"),
            ("footer", "{sharebuttons}<a href=\"{externallink=docs}\">Docs</a>"),
        ]);
        let rendered = renderer
            .render_page_content(&content, &current, &mut cache)
            .unwrap();

        assert!(rendered["header"].starts_with("<nav class=\"langbar\">"));
        assert!(rendered["header"].contains("<a href=\"/page-2\">de</a>"));

        let buttons = "<div class='share-buttons'>\n<a class=\"fb\">Share</a><a class=\"tw\">Tweet</a></div>\n";
        assert_eq!(
            rendered["main"],
            format!(
                "<a href=\"https://example.com/page-2?ct={}\">Deutsch</a> {}",
                r#"{"source":["page",1]}"#, buttons
            )
        );
        assert_eq!(
            rendered["footer"],
            format!(
                "{}<a href=\"https://example.com/r/docs?ct={}\">Docs</a>",
                buttons, r#"{"source":["page",1]}"#
            )
        );

        for html in rendered.values() {
            assert!(!html.contains("{langbar}"));
            assert!(!html.contains("{sharebuttons}"));
            assert!(!html.contains("{pagelink="));
            assert!(!html.contains("{externallink="));
        }

        // share buttons fetched and styled once for the whole pass
        assert_eq!(fixture.share_requests.get(), 1);
        assert_eq!(cache.stylesheets().len(), 1);
        assert!(cache.stylesheets()[0].contains("sharebuttons.css"));
    }
}
