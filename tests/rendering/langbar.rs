#[cfg(test)]
mod verify {
    use page_tokens::rendering::{ResolutionCache, TokenRenderer};
    use page_tokens::templating::Templates;

    use crate::doubles::{page, Fixture};

    /// A French parent page with English and German translations, where
    /// German has no translated label.
    fn group() -> Fixture {
        Fixture::new()
            .with_page(page(1, "fr", None, vec![2, 3]))
            .with_page(page(2, "en", Some(1), vec![]))
            .with_page(page(3, "de", Some(1), vec![]))
            .with_translation("lang.fr", "Français")
            .with_translation("lang.en", "English")
    }

    fn links(html: &str) -> Vec<&str> {
        html.lines()
            .filter(|line| line.contains("<li>"))
            .collect()
    }

    #[test]
    fn untranslated_pages_have_no_bar() {
        let fixture = Fixture::new().with_page(page(7, "en", None, vec![]));
        let templates = Templates::new().unwrap();
        let renderer = TokenRenderer::new(&fixture, &fixture, &fixture, &fixture, &templates);
        let mut cache = ResolutionCache::new();

        let result = renderer
            .render_language_bar(&page(7, "en", None, vec![]), &mut cache)
            .unwrap();

        assert_eq!(result, None);
        assert_eq!(fixture.page_lookups.get(), 0);
    }

    #[test]
    fn languages_sorted_by_label() {
        let fixture = group();
        let templates = Templates::new().unwrap();
        let renderer = TokenRenderer::new(&fixture, &fixture, &fixture, &fixture, &templates);
        let mut cache = ResolutionCache::new();

        let html = renderer
            .render_language_bar(&page(1, "fr", None, vec![2, 3]), &mut cache)
            .unwrap()
            .unwrap();

        assert_eq!(
            links(&html),
            vec![
                r#"    <li><a href="/page-3">de</a></li>"#,
                r#"    <li><a href="/page-2">English</a></li>"#,
                r#"    <li><a href="/page-1">Français</a></li>"#,
            ]
        );
    }

    #[test]
    fn children_list_the_whole_group() {
        let fixture = group();
        let templates = Templates::new().unwrap();
        let renderer = TokenRenderer::new(&fixture, &fixture, &fixture, &fixture, &templates);
        let mut cache = ResolutionCache::new();

        let html = renderer
            .render_language_bar(&page(2, "en", Some(1), vec![]), &mut cache)
            .unwrap()
            .unwrap();

        assert_eq!(links(&html).len(), 3);
        assert!(html.contains(r#"<a href="/page-1">Français</a>"#));
    }

    #[test]
    fn missing_children_are_skipped() {
        let fixture = Fixture::new()
            .with_page(page(1, "fr", None, vec![2, 8]))
            .with_page(page(2, "en", Some(1), vec![]));
        let templates = Templates::new().unwrap();
        let renderer = TokenRenderer::new(&fixture, &fixture, &fixture, &fixture, &templates);
        let mut cache = ResolutionCache::new();

        let html = renderer
            .render_language_bar(&page(1, "fr", None, vec![2, 8]), &mut cache)
            .unwrap()
            .unwrap();

        assert_eq!(
            links(&html),
            vec![
                r#"    <li><a href="/page-2">en</a></li>"#,
                r#"    <li><a href="/page-1">fr</a></li>"#,
            ]
        );
    }

    #[test]
    fn groups_without_members_have_no_bar() {
        // the parent no longer lists this page, or anything else
        let fixture = Fixture::new().with_page(page(1, "fr", None, vec![]));
        let templates = Templates::new().unwrap();
        let renderer = TokenRenderer::new(&fixture, &fixture, &fixture, &fixture, &templates);
        let mut cache = ResolutionCache::new();

        let result = renderer
            .render_language_bar(&page(2, "en", Some(1), vec![]), &mut cache)
            .unwrap();

        assert_eq!(result, None);
    }

    #[test]
    fn bar_is_computed_once_per_pass() {
        let fixture = group();
        let templates = Templates::new().unwrap();
        let renderer = TokenRenderer::new(&fixture, &fixture, &fixture, &fixture, &templates);
        let mut cache = ResolutionCache::new();
        let parent = page(1, "fr", None, vec![2, 3]);

        let first = renderer
            .render_language_bar(&parent, &mut cache)
            .unwrap();
        let lookups = fixture.page_lookups.get();

        let second = renderer
            .render_language_bar(&parent, &mut cache)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(fixture.page_lookups.get(), lookups);
    }
}
