// Command-line interface for global message banners
//
// This binary manages the announcement banners a hosted DevOps project shows
// platform-wide. Banners live in the project's settings store; this tool
// fetches, creates and deletes them through banner-core's store client and
// codec.
//
// Usage:
//  banners list                                   - Show every banner in the store
//  banners add <message> [--level] [--priority] [--expires <when>]
//  banners delete <key>                           - Delete one banner by composite key
//  banners delete-all --yes                       - Clear the whole namespace
//  banners preview <message> [--to <dialect>]     - Offline dialect conversion
//
// Authentication:
//
// Network commands need a bearer token, taken from --token or the BANNERS_PAT
// environment variable, and a service URL, taken from --url or configuration
// (banners.toml next to the working directory, or an explicit --config file).

mod expiry;

use banner_config::{BannerConfig, Loader};
use banner_core::banner::NAMESPACE;
use banner_core::{codec, dialects, Banner, Level, Priority, StoreClient};
use chrono::{SecondsFormat, Utc};
use clap::{Arg, ArgAction, Command, ValueHint};
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("banners")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage the global message banners of a hosted DevOps project")
        .long_about(
            "banners is a command-line tool for the announcement banners shown\n\
            platform-wide by a hosted DevOps service.\n\n\
            Messages use a small markdown dialect: **bold**, *italic* and\n\
            [link](http://example.com). The settings store keeps the HTML\n\
            rendition; conversion happens transparently on save and load.\n\n\
            Examples:\n  \
            banners list\n  \
            banners add \"Maintenance **tonight** at 9pm UTC\" --level warning\n  \
            banners add \"Read [this](https://example.com)\" --expires \"12/31/2026 23:59\"\n  \
            banners delete p2-1692388123456\n  \
            banners preview \"**bold** words\" --to html",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a banners.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("url")
                .long("url")
                .value_name("URL")
                .help("Service root URL (overrides configuration)")
                .global(true),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .value_name("TOKEN")
                .help("Bearer token (falls back to the BANNERS_PAT environment variable)")
                .global(true),
        )
        .subcommand(
            Command::new("list")
                .about("Show every banner in the store")
                .long_about(
                    "Fetch the whole banner namespace and print one line per banner:\n\
                    priority, level, message id, expiry status and the message in\n\
                    the markdown dialect.\n\n\
                    Rows that fail to decode are reported on stderr but never hide\n\
                    the banners that decoded cleanly.",
                ),
        )
        .subcommand(
            Command::new("add")
                .about("Create a banner and save it to the store")
                .long_about(
                    "Create a fresh banner with a newly minted message id and save it.\n\n\
                    The message may use **bold**, *italic* and [link](url) syntax and\n\
                    is limited to a configurable number of words (30 by default).\n\n\
                    Examples:\n  \
                    banners add \"Deploys are frozen until **Monday**\"\n  \
                    banners add \"Outage ongoing\" --level error --priority p0\n  \
                    banners add \"Beta ends soon\" --expires 2026-12-31T23:59:00Z",
                )
                .arg(
                    Arg::new("message")
                        .help("Banner message in the markdown dialect")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("level")
                        .long("level")
                        .help("Severity: info, warning or error (default info)")
                        .value_parser(["info", "warning", "error"]),
                )
                .arg(
                    Arg::new("priority")
                        .long("priority")
                        .help("Precedence among active banners: p0, p1 or p2 (default p2)")
                        .value_parser(["p0", "p1", "p2"]),
                )
                .arg(
                    Arg::new("expires")
                        .long("expires")
                        .value_name("WHEN")
                        .help("Expiration as RFC 3339 or \"MM/DD/YYYY HH:MM\" local time")
                        .long_help(
                            "When the banner stops being shown.\n\n\
                            Accepts an RFC 3339 instant (2026-12-31T23:59:00Z) or the\n\
                            \"MM/DD/YYYY HH:MM\" form interpreted in local time.\n\
                            Omit the flag to show the banner indefinitely.",
                        ),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete one banner by its composite key")
                .long_about(
                    "Delete a single banner. The key is the one printed by `banners\n\
                    list`: `p1-1692388123456`, with or without the\n\
                    GlobalMessageBanners/ namespace prefix.",
                )
                .arg(
                    Arg::new("key")
                        .help("Composite key, e.g. p2-1692388123456")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("delete-all")
                .about("Delete every banner in the namespace")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .help("Confirm the deletion; without it nothing happens")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("preview")
                .about("Convert a message between dialects without touching the store")
                .long_about(
                    "Run the dialect converter locally.\n\n\
                    With --to html (the default) the input is markdown and the HTML\n\
                    rendition is printed; with --to markdown the reverse. With\n\
                    --entry the full encoded store entry for a fresh default-priority\n\
                    banner is printed as JSON instead.\n\n\
                    Examples:\n  \
                    banners preview \"**bold** and [a link](http://x.com)\"\n  \
                    banners preview \"<em>was italic</em>\" --to markdown\n  \
                    banners preview \"Planned downtime\" --entry",
                )
                .arg(
                    Arg::new("message")
                        .help("Message to convert")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target dialect")
                        .value_parser(["html", "markdown"])
                        .default_value("html"),
                )
                .arg(
                    Arg::new("entry")
                        .long("entry")
                        .help("Print the encoded store entry as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_one::<String>("url").map(|s| s.as_str()),
    );

    match matches.subcommand() {
        Some(("list", _)) => {
            let client = connect(&config, &matches);
            handle_list_command(&client).await;
        }
        Some(("add", sub_matches)) => {
            let message = sub_matches
                .get_one::<String>("message")
                .expect("message is required");
            let level = sub_matches.get_one::<String>("level").map(|s| s.as_str());
            let priority = sub_matches
                .get_one::<String>("priority")
                .map(|s| s.as_str());
            let expires = sub_matches.get_one::<String>("expires").map(|s| s.as_str());
            handle_add_command(message, level, priority, expires, &config, &matches).await;
        }
        Some(("delete", sub_matches)) => {
            let key = sub_matches
                .get_one::<String>("key")
                .expect("key is required");
            let client = connect(&config, &matches);
            handle_delete_command(key, &client).await;
        }
        Some(("delete-all", sub_matches)) => {
            if !sub_matches.get_flag("yes") {
                eprintln!("Refusing to delete all banners without --yes");
                std::process::exit(1);
            }
            let client = connect(&config, &matches);
            handle_delete_all_command(&client).await;
        }
        Some(("preview", sub_matches)) => {
            let message = sub_matches
                .get_one::<String>("message")
                .expect("message is required");
            let to = sub_matches
                .get_one::<String>("to")
                .expect("to has a default");
            let entry = sub_matches.get_flag("entry");
            handle_preview_command(message, to, entry);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the list command
async fn handle_list_command(client: &StoreClient) {
    let decoded = client.fetch_all().await.unwrap_or_else(|err| {
        eprintln!("There was an error loading the banners: {err}");
        std::process::exit(1);
    });

    for (key, err) in &decoded.rejected {
        eprintln!("warning: skipped '{key}': {err}");
    }

    if decoded.banners.is_empty() {
        println!("No banners yet.");
        return;
    }

    for banner in &decoded.banners {
        println!(
            "{}  {:<7}  {:<16}  {:<42}  {}",
            banner.priority.wire_name(),
            banner.level.wire_name(),
            banner.message_id,
            describe_expiry(banner),
            banner.message
        );
    }
}

/// Handle the add command
async fn handle_add_command(
    message: &str,
    level: Option<&str>,
    priority: Option<&str>,
    expires: Option<&str>,
    config: &BannerConfig,
    matches: &clap::ArgMatches,
) {
    let mut banner = Banner::new();
    banner.message = message.to_string();

    if banner.message_word_count() > config.message.max_words {
        eprintln!(
            "Message too long: {} words (limit {})",
            banner.message_word_count(),
            config.message.max_words
        );
        std::process::exit(1);
    }

    if let Some(raw) = level {
        banner.level = Level::from_wire_name(raw).unwrap_or_else(|| {
            eprintln!("Unknown level '{raw}'. Use info, warning or error.");
            std::process::exit(1);
        });
    }

    if let Some(raw) = priority {
        banner.priority = Priority::from_wire_name(raw).unwrap_or_else(|| {
            eprintln!("Unknown priority '{raw}'. Use p0, p1 or p2.");
            std::process::exit(1);
        });
    }

    if let Some(raw) = expires {
        banner.expiration_date = Some(expiry::parse_expiry(raw, Utc::now()).unwrap_or_else(
            |err| {
                eprintln!("{err}");
                std::process::exit(1);
            },
        ));
    }

    let client = connect(config, matches);
    if let Err(err) = client.upsert(&banner).await {
        eprintln!("Unable to save: {err}");
        std::process::exit(1);
    }

    println!("Saved {}", banner.storage_key());
    println!("{}", describe_expiry(&banner));
}

/// Handle the delete command
async fn handle_delete_command(key: &str, client: &StoreClient) {
    // Re-derive the canonical namespaced key so both bare and namespaced
    // input address the same row.
    let (priority, message_id) = codec::parse_storage_key(key).unwrap_or_else(|err| {
        eprintln!("{err}");
        std::process::exit(1);
    });
    let canonical = format!("{NAMESPACE}/{}-{}", priority.wire_name(), message_id);

    if let Err(err) = client.delete_by_key(&canonical).await {
        eprintln!("Unable to delete: {err}");
        std::process::exit(1);
    }

    println!("Deleted {canonical}");
}

/// Handle the delete-all command
async fn handle_delete_all_command(client: &StoreClient) {
    if let Err(err) = client.delete_all().await {
        eprintln!("There was an error deleting all banners: {err}");
        std::process::exit(1);
    }

    println!("Deleted all banners.");
}

/// Handle the preview command
fn handle_preview_command(message: &str, to: &str, entry: bool) {
    if entry {
        let mut banner = Banner::new();
        banner.message = message.to_string();
        let encoded = codec::encode(&banner);
        let json = serde_json::to_string_pretty(&encoded).unwrap_or_else(|err| {
            eprintln!("Serialization error: {err}");
            std::process::exit(1);
        });
        println!("{json}");
        return;
    }

    let converted = match to {
        "markdown" => dialects::to_markdown(message),
        _ => dialects::to_html(message),
    };
    println!("{converted}");
}

/// Human-readable expiry status, mirroring the banner card's status text.
fn describe_expiry(banner: &Banner) -> String {
    match banner.expiration_date {
        None => "shown indefinitely".to_string(),
        Some(date) if date < Utc::now() => format!(
            "was shown until {}",
            date.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        Some(date) => format!(
            "shown until {}",
            date.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
    }
}

fn load_cli_config(explicit_path: Option<&str>, url_flag: Option<&str>) -> BannerConfig {
    let loader = Loader::new().with_optional_file("banners.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = if let Some(url) = url_flag {
        loader
            .set_override("service.base_url", url)
            .unwrap_or_else(|err| {
                eprintln!("Failed to apply --url: {err}");
                std::process::exit(1);
            })
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Build a store client from configuration plus the auth flags, or exit with
/// a clear message when either half is missing.
fn connect(config: &BannerConfig, matches: &clap::ArgMatches) -> StoreClient {
    if config.service.base_url.is_empty() {
        eprintln!("No service URL configured. Use --url, banners.toml or --config.");
        std::process::exit(1);
    }

    let token = matches
        .get_one::<String>("token")
        .cloned()
        .or_else(|| std::env::var("BANNERS_PAT").ok())
        .unwrap_or_else(|| {
            eprintln!("No access token provided. Use --token or set BANNERS_PAT.");
            std::process::exit(1);
        });

    StoreClient::new(config.service.store_options(token))
}
