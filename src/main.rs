use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use tracing::{debug, Level};

use page_tokens::builder;
use page_tokens::content::{ContentSlots, Lead, Source};
use page_tokens::dashboard::{Dashboard, WidgetParams, WidgetRequest};
use page_tokens::rendering::{ResolutionCache, TokenRenderer};
use page_tokens::services::{TimeUnit, TranslationLookup};
use page_tokens::site::Site;
use page_tokens::templating::Templates;
use page_tokens::{Error, Result};

/// Whether `error:` is written in colour.
static COLOUR: OnceLock<bool> = OnceLock::new();

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let site = Arg::new("site")
        .long("site")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .help("The JSON file describing the site's pages, redirects, translations, and hits.");

    let slots = Arg::new("slots")
        .num_args(0..)
        .value_parser(clap::value_parser!(PathBuf))
        .help("Files containing the HTML of each slot, named after the file. Reads a single slot \"main\" from standard input if none are given.");

    let matches = Command::new("page-tokens")
        .version(VERSION)
        .propagate_version(true)
        .about("Render landing page and email tokens, and page dashboard widgets.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log what is being resolved to standard error."),
        )
        .arg(
            Arg::new("raw-control-chars")
                .short('R')
                .long("raw-control-chars")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit ANSI escape codes for coloured errors even if standard error is redirected to a pipe or file."),
        )
        .subcommand(
            Command::new("page")
                .about("Substitute tokens into the content of a landing page")
                .arg(site.clone())
                .arg(
                    Arg::new("page")
                        .long("page")
                        .required(true)
                        .value_parser(clap::value_parser!(u64))
                        .help("The id of the page being displayed."),
                )
                .arg(
                    Arg::new("head")
                        .long("head")
                        .action(ArgAction::SetTrue)
                        .help("Also print markup to be added to the document head."),
                )
                .arg(slots.clone()),
        )
        .subcommand(
            Command::new("email")
                .about("Substitute link tokens into the content of an email")
                .arg(site.clone())
                .arg(
                    Arg::new("source")
                        .long("source")
                        .required(true)
                        .value_parser(|s: &str| s.parse::<Source>())
                        .help("Where the email is sent from, as KIND:ID, for example email:5."),
                )
                .arg(
                    Arg::new("lead")
                        .long("lead")
                        .value_parser(clap::value_parser!(u64))
                        .help("The id of the lead the email is sent to."),
                )
                .arg(slots),
        )
        .subcommand(
            Command::new("widget")
                .about("Assemble the data for a page dashboard widget")
                .arg(site.clone())
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("The widget type, for example popular.pages."),
                )
                .arg(
                    Arg::new("height")
                        .long("height")
                        .default_value("300")
                        .value_parser(clap::value_parser!(i64))
                        .help("Height of the widget in pixels."),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .required(true)
                        .value_parser(|s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
                        .help("First day of the reporting period, as YYYY-MM-DD."),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .required(true)
                        .value_parser(|s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
                        .help("Last day of the reporting period, as YYYY-MM-DD."),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(clap::value_parser!(u32))
                        .help("Number of table rows. Derived from the height if not given."),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .value_parser(clap::value_parser!(u32))
                        .help("Number of periods in a time series."),
                )
                .arg(
                    Arg::new("unit")
                        .long("unit")
                        .value_parser(|s: &str| s.parse::<TimeUnit>())
                        .help("Length of each period in a time series: D, W, M, or Y."),
                )
                .arg(
                    Arg::new("cached")
                        .long("cached")
                        .action(ArgAction::SetTrue)
                        .help("Behave as if the widget's data were already cached."),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the widget's template and data as JSON instead of rendering it."),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("List the tokens offered by the page or email builder")
                .arg(site)
                .arg(
                    Arg::new("email")
                        .long("email")
                        .action(ArgAction::SetTrue)
                        .help("List the email builder's tokens rather than the page builder's."),
                ),
        )
        .get_matches();

    let colour = *COLOUR.get_or_init(|| {
        matches.get_flag("raw-control-chars")
            || std::io::stderr()
                .is_terminal()
    });

    let level = if matches.get_flag("debug") {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(colour)
        .init();

    let result = match matches.subcommand() {
        Some(("page", submatches)) => run_page(submatches),
        Some(("email", submatches)) => run_email(submatches),
        Some(("widget", submatches)) => run_widget(submatches),
        Some(("tokens", submatches)) => run_tokens(submatches),
        Some(_) => {
            println!("No valid subcommand was used");
            Ok(())
        }
        None => {
            println!("usage: page-tokens [COMMAND] ...");
            println!("Try '--help' for more information.");
            Ok(())
        }
    };

    if let Err(error) = result {
        fail(&error.to_string());
    }
}

fn fail(message: &str) -> ! {
    if COLOUR
        .get()
        .copied()
        .unwrap_or(false)
    {
        eprintln!("{}: {}", "error".bright_red(), message);
    } else {
        eprintln!("error: {}", message);
    }
    std::process::exit(1);
}

fn load_site(submatches: &ArgMatches) -> Result<Site> {
    let filename = submatches
        .get_one::<PathBuf>("site")
        .expect("site is a required argument");
    debug!(?filename);

    Site::load(filename)
}

/// Read each slot from its file, or a single slot from stdin.
fn read_slots(submatches: &ArgMatches) -> Result<ContentSlots> {
    let mut content = ContentSlots::new();

    let files: Vec<&PathBuf> = submatches
        .get_many::<PathBuf>("slots")
        .map(|files| files.collect())
        .unwrap_or_default();

    if files.is_empty() {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .map_err(|source| Error::Io {
                path: PathBuf::from("-"),
                source,
            })?;
        content.insert("main".to_string(), html);
        return Ok(content);
    }

    for file in files {
        let html = std::fs::read_to_string(file).map_err(|source| Error::Io {
            path: file.clone(),
            source,
        })?;
        content.insert(slot_name(file), html);
    }

    Ok(content)
}

fn slot_name(file: &Path) -> String {
    file.file_stem()
        .map(|stem| {
            stem.to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "main".to_string())
}

fn print_slots(content: &ContentSlots) {
    if content.len() == 1 {
        if let Some(html) = content.values().next() {
            print!("{}", html);
        }
        return;
    }

    for (slot, html) in content {
        println!("<!-- slot: {} -->", slot);
        print!("{}", html);
    }
}

fn run_page(submatches: &ArgMatches) -> Result<()> {
    let site = load_site(submatches)?;
    let templates = Templates::new()?;

    let id = *submatches
        .get_one::<u64>("page")
        .expect("page is a required argument");
    let page = match site.page(id) {
        Some(page) => page.clone(),
        None => fail(&format!("no page with id {}", id)),
    };

    let content = read_slots(submatches)?;

    let renderer = TokenRenderer::new(&site, &site, &site, &site, &templates);
    let mut cache = ResolutionCache::new();
    let rendered = renderer.render_page_content(&content, &page, &mut cache)?;

    if submatches.get_flag("head") {
        for markup in cache.stylesheets() {
            print!("{}", markup);
        }
    }
    print_slots(&rendered);

    Ok(())
}

fn run_email(submatches: &ArgMatches) -> Result<()> {
    let site = load_site(submatches)?;
    let templates = Templates::new()?;

    let source = submatches
        .get_one::<Source>("source")
        .expect("source is a required argument")
        .clone();
    let lead = submatches
        .get_one::<u64>("lead")
        .map(|id| Lead { id: *id });

    let content = read_slots(submatches)?;

    let renderer = TokenRenderer::new(&site, &site, &site, &site, &templates);
    let mut cache = ResolutionCache::new();
    let rendered = renderer.render_email_content(&content, source, lead.as_ref(), &mut cache)?;

    print_slots(&rendered);

    Ok(())
}

fn run_widget(submatches: &ArgMatches) -> Result<()> {
    let site = load_site(submatches)?;
    let templates = Templates::new()?;

    let request = WidgetRequest {
        widget_type: submatches
            .get_one::<String>("type")
            .expect("type is a required argument")
            .clone(),
        height: *submatches
            .get_one::<i64>("height")
            .expect("height has a default"),
        params: WidgetParams {
            date_from: *submatches
                .get_one::<NaiveDate>("from")
                .expect("from is a required argument"),
            date_to: *submatches
                .get_one::<NaiveDate>("to")
                .expect("to is a required argument"),
            amount: submatches
                .get_one::<u32>("amount")
                .copied(),
            time_unit: submatches
                .get_one::<TimeUnit>("unit")
                .copied(),
            limit: submatches
                .get_one::<u32>("limit")
                .copied(),
        },
    };

    let dashboard = Dashboard::new(&site, &site, &site, &templates);
    let detail = match dashboard.generate(&request, submatches.get_flag("cached"))? {
        Some(detail) => detail,
        None => fail(&format!(
            "unknown widget type \"{}\"; expected one of {}",
            request.widget_type,
            dashboard
                .types()
                .join(", ")
        )),
    };

    if submatches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    match &detail.data {
        Some(data) => print!("{}", dashboard.render(detail.template, data)?),
        None => println!("{} (data cached)", detail.template),
    }

    Ok(())
}

fn run_tokens(submatches: &ArgMatches) -> Result<()> {
    let site = load_site(submatches)?;
    let templates = Templates::new()?;

    let sections = if submatches.get_flag("email") {
        builder::email_build(&site, &site, &templates)?
    } else {
        let build = builder::page_build(&site, &site, &templates)?;
        for criterion in &build.criteria {
            debug!(key = criterion.key, kind = ?criterion.kind, "A/B test criterion");
        }
        build.sections
    };

    for section in sections {
        println!("<!-- {}: {} -->", section.key, site.translate(section.header));
        print!("{}", section.content);
    }

    Ok(())
}
