//! Command-line interface for chat markup.
//!
//! Usage:
//!   chat-markup parse [path] [--format outline|plain|markup]  - Parse markup into a tree
//!   chat-markup from-html [path]                              - Serialize an HTML fragment to markup
//!   chat-markup tags                                          - List the tag vocabulary
//!
//! Input is read from standard input when no path is given. `--log <file>`
//! writes diagnostics from the converter to a file.
mod error;
mod log_init;

use std::io::Read;

use clap::{Arg, ArgMatches, Command};
use log::LevelFilter;
use markup::dom::Fragment;
use markup::{TagTable, outline, parse, plain_text, render_markup, serialize};

use error::{CliError, Result};

fn main() {
    let matches = Command::new("chat-markup")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between chat bracket-tag markup and rich text")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log")
                .long("log")
                .global(true)
                .help("Append diagnostics to this file"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("debug")
                .help("Most verbose level written to the log file (error..trace)"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse markup and print the resulting tree")
                .arg(
                    Arg::new("path")
                        .help("Markup file to read (standard input if omitted)")
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["outline", "plain", "markup"])
                        .default_value("outline"),
                ),
        )
        .subcommand(
            Command::new("from-html")
                .about("Serialize an HTML fragment to markup")
                .arg(
                    Arg::new("path")
                        .help("HTML file to read (standard input if omitted)")
                        .index(1),
                ),
        )
        .subcommand(Command::new("tags").about("List recognized tag names"))
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    if let Some(path) = matches.get_one::<String>("log") {
        let level = matches
            .get_one::<String>("log-level")
            .map_or("debug", String::as_str);
        let level = level
            .parse::<LevelFilter>()
            .map_err(|_| CliError::InvalidLogLevel(level.to_string()))?;
        log_init::init_logger(path, level)?;
    }

    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let input = read_input(parse_matches.get_one::<String>("path"))?;
            let format = parse_matches
                .get_one::<String>("format")
                .map_or("outline", String::as_str);
            handle_parse_command(&input, format);
        }
        Some(("from-html", html_matches)) => {
            let input = read_input(html_matches.get_one::<String>("path"))?;
            handle_from_html_command(&input);
        }
        Some(("tags", _)) => handle_tags_command(),
        _ => unreachable!(),
    }
    Ok(())
}

/// Read the whole input from a file, or from standard input.
fn read_input(path: Option<&String>) -> Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn handle_parse_command(input: &str, format: &str) {
    let nodes = parse(input);
    match format {
        "plain" => println!("{}", plain_text(&nodes)),
        "markup" => println!("{}", render_markup(&nodes, TagTable::global())),
        _ => print!("{}", outline(&nodes)),
    }
}

fn handle_from_html_command(input: &str) {
    let mut fragment = Fragment::from_html(input);
    println!("{}", serialize(&mut fragment));
}

fn handle_tags_command() {
    for (name, kind) in TagTable::global().names() {
        let form = if kind.is_self_closing() {
            format!("[{name}/]")
        } else {
            format!("[{name}]...[/{name}]")
        };
        println!("{:<22} {:<18} {}", name, format!("{kind:?}"), form);
    }
}
