#[cfg(test)]
mod verify {
    use std::io::Write;
    use std::path::PathBuf;
    use std::process::{Command, Output, Stdio};

    const SITE: &str = "tests/samples/site.json";

    fn run(args: &[&str], input: Option<&str>) -> Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_page-tokens"))
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to start page-tokens");

        if let (Some(input), Some(mut stdin)) = (input, child.stdin.take()) {
            stdin
                .write_all(input.as_bytes())
                .expect("Failed to write to stdin");
        }

        child
            .wait_with_output()
            .expect("Failed to wait for page-tokens")
    }

    fn stdout(output: &Output) -> String {
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    fn stderr(output: &Output) -> String {
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    fn widget(extra: &[&str]) -> Output {
        let mut args = vec![
            "widget", "--site", SITE, "--from", "2024-04-01", "--to", "2024-04-30",
        ];
        args.extend_from_slice(extra);
        run(&args, None)
    }

    #[test]
    fn page_from_stdin() {
        let output = run(
            &["page", "--site", SITE, "--page", "2"],
            Some("<header>{LangBar}</header>\n<a href=\"{pagelink=4}\">Prix</a>\n"),
        );

        assert!(output
            .status
            .success());
        let html = stdout(&output);
        assert!(html.starts_with("<header><nav class=\"langbar\">"));
        assert!(html.contains("<li><a href=\"/fruehlingsstart\">de</a></li>"));
        assert!(html.contains(
            "<a href=\"https://pages.example.com/pricing?ct=%7B%22source%22%3A%5B%22page%22%2C2%5D%7D\">Prix</a>"
        ));
        assert!(!html.contains("{"));
        assert!(!html.contains("<!-- slot"));
    }

    #[test]
    fn page_from_slot_files() {
        let dir = std::env::temp_dir().join(format!("page-tokens-slots-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let header: PathBuf = dir.join("header.html");
        let footer: PathBuf = dir.join("footer.html");
        std::fs::write(&header, "<h1>Pricing</h1>\n").unwrap();
        std::fs::write(&footer, "<a href=\"{externallink=a1b2c3}\">Docs</a>\n").unwrap();

        let output = run(
            &[
                "page",
                "--site",
                SITE,
                "--page",
                "4",
                header
                    .to_str()
                    .unwrap(),
                footer
                    .to_str()
                    .unwrap(),
            ],
            None,
        );
        std::fs::remove_dir_all(&dir).ok();

        assert!(output
            .status
            .success());
        assert_eq!(
            stdout(&output),
            "<!-- slot: footer -->\n\
             <a href=\"https://pages.example.com/r/a1b2c3?ct=%7B%22source%22%3A%5B%22page%22%2C4%5D%7D\">Docs</a>\n\
             <!-- slot: header -->\n\
             <h1>Pricing</h1>\n"
        );
    }

    #[test]
    fn head_stylesheet_only_when_asked() {
        let output = run(
            &["page", "--site", SITE, "--page", "1", "--head"],
            Some("{sharebuttons}"),
        );
        let html = stdout(&output);
        assert!(html.starts_with(
            "<link rel=\"stylesheet\" type=\"text/css\" href=\"media/css/sharebuttons.css\" />\n<div class='share-buttons'>\n"
        ));

        let output = run(&["page", "--site", SITE, "--page", "1"], Some("{sharebuttons}"));
        let html = stdout(&output);
        assert!(html.starts_with("<div class='share-buttons'>\n"));
        assert!(!html.contains("sharebuttons.css"));
    }

    #[test]
    fn email_links_carry_the_lead() {
        let output = run(
            &[
                "email", "--site", SITE, "--source", "email:8", "--lead", "5",
            ],
            Some("<a href=\"{pagelink=4}\">Pricing</a>"),
        );

        assert!(output
            .status
            .success());
        assert_eq!(
            stdout(&output),
            "<a href=\"https://pages.example.com/pricing?ct=%7B%22source%22%3A%5B%22email%22%2C8%5D%2C%22lead%22%3A5%7D\">Pricing</a>"
        );
    }

    #[test]
    fn unknown_page() {
        let output = run(&["page", "--site", SITE, "--page", "99"], None);

        assert_eq!(
            output
                .status
                .code(),
            Some(1)
        );
        assert_eq!(stderr(&output), "error: no page with id 99\n");
        assert!(stdout(&output).is_empty());
    }

    #[test]
    fn coloured_errors_when_forced() {
        let output = run(&["page", "-R", "--site", SITE, "--page", "99"], None);

        assert_eq!(
            output
                .status
                .code(),
            Some(1)
        );
        assert_eq!(stderr(&output), "\u{1b}[91merror\u{1b}[39m: no page with id 99\n");
    }

    #[test]
    fn unreadable_site() {
        let output = run(
            &["page", "--site", "tests/samples/missing.json", "--page", "1"],
            None,
        );

        assert_eq!(
            output
                .status
                .code(),
            Some(1)
        );
        assert!(stderr(&output).starts_with("error: unable to read tests/samples/missing.json: "));
    }

    #[test]
    fn unknown_widget_type() {
        let output = widget(&["--type", "unknown.widget.type"]);

        assert_eq!(
            output
                .status
                .code(),
            Some(1)
        );
        assert!(stderr(&output).starts_with(
            "error: unknown widget type \"unknown.widget.type\"; expected one of page.hits.in.time, "
        ));
    }

    #[test]
    fn widget_as_json() {
        let output = widget(&["--type", "popular.pages", "--json"]);
        assert!(output
            .status
            .success());

        let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(json["template"], "core:table");
        assert_eq!(json["data"]["headItems"], serde_json::json!(["Title", "Hits"]));

        let rows = json["data"]["bodyItems"]
            .as_array()
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0]["text"], "Pricing");
        assert_eq!(rows[0][0]["link"], "/s/pages/view/4");
        assert_eq!(rows[0][1]["text"], "3");
    }

    #[test]
    fn cached_widget() {
        let output = widget(&["--type", "popular.pages", "--cached"]);
        assert!(output
            .status
            .success());
        assert_eq!(stdout(&output), "core:table (data cached)\n");

        let output = widget(&["--type", "dwell.times", "--cached", "--json"]);
        let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(json["template"], "core:chart");
        assert!(json["data"].is_null());
    }

    #[test]
    fn widget_rendered() {
        let output = widget(&["--type", "page.hits.in.time", "--amount", "5"]);
        assert!(output
            .status
            .success());

        let html = stdout(&output);
        assert!(html.contains("class=\"chart line-chart\""));
        assert!(html.contains("height=\"220\""));
        assert!(html.contains("&quot;2024-04-30&quot;"));
    }

    #[test]
    fn builder_tokens() {
        let output = run(&["tokens", "--site", SITE], None);
        assert!(output
            .status
            .success());

        let html = stdout(&output);
        assert!(html.contains("<!-- page.extratokens: page.builder.header.extra -->"));
        assert!(html.contains("data-token=\"{langbar}\">Language bar</a>"));
        assert!(html.contains("data-token=\"{pagelink=4}\">Pricing</a>"));

        let output = run(&["tokens", "--site", SITE, "--email"], None);
        let html = stdout(&output);
        assert!(html.starts_with("<!-- page.emailtokens: page.builder.header.index -->"));
        assert!(!html.contains("{langbar}"));
    }
}
