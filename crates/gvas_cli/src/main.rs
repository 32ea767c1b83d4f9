use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use gvas_core::context::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_ELEMENT_COUNT};
use gvas_core::{DecodeOptions, Decoder, Document};
use gvas_render::{
    JsonStyle, missing_fields, render_document_json, render_metadata_json, render_metadata_text,
    render_text, select_fields,
};
use serde_json::Value as JsonValue;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "FILE")]
    path: PathBuf,
    /// Print only the header record
    #[arg(long, conflicts_with = "field")]
    meta: bool,
    /// Print an indented text tree instead of JSON
    #[arg(long, conflicts_with = "compact")]
    text: bool,
    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,
    /// Print only this top-level field (repeatable)
    #[arg(long, value_name = "NAME")]
    field: Vec<String>,
    #[arg(long = "max-depth", value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    #[arg(long = "max-elements", value_name = "N", default_value_t = DEFAULT_MAX_ELEMENT_COUNT)]
    max_elements: usize,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let bytes = fs::read(&cli.path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", cli.path.display());
        process::exit(1);
    });
    debug!(path = %cli.path.display(), len = bytes.len(), "read input");

    let decoder = Decoder::with_options(
        DecodeOptions::new()
            .with_max_depth(cli.max_depth)
            .with_max_element_count(cli.max_elements),
    );
    debug!(
        max_depth = decoder.options().max_depth,
        max_element_count = decoder.options().max_element_count,
        "decoder limits"
    );

    if cli.meta {
        let metadata = decoder
            .decode_metadata(Cursor::new(&bytes))
            .unwrap_or_else(|e| exit_decode_error(&cli, &e));
        if cli.text {
            print!("{}", render_metadata_text(&metadata));
        } else {
            print_json(&render_metadata_json(&metadata), cli.compact);
        }
        return;
    }

    let document = decoder
        .decode_bytes(&bytes)
        .unwrap_or_else(|e| exit_decode_error(&cli, &e));

    if !cli.field.is_empty() {
        let missing = missing_fields(&document.properties, &cli.field);
        if !missing.is_empty() {
            eprintln!("Field(s) not found: {}", missing.join(", "));
            process::exit(1);
        }
        let selected = Document {
            metadata: None,
            properties: select_fields(&document.properties, &cli.field),
        };
        emit_document(&selected, JsonStyle::PropertiesOnly, &cli);
        return;
    }

    emit_document(&document, JsonStyle::CanonicalV1, &cli);
}

fn emit_document(document: &Document, style: JsonStyle, cli: &Cli) {
    if cli.text {
        print!("{}", render_text(document));
    } else {
        print_json(&render_document_json(document, style), cli.compact);
    }
}

fn print_json(json: &JsonValue, compact: bool) {
    let rendered = if compact {
        serde_json::to_string(json)
    } else {
        serde_json::to_string_pretty(json)
    };
    let rendered = rendered.unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}

fn exit_decode_error(cli: &Cli, err: &gvas_core::DecodeError) -> ! {
    eprintln!("Error decoding {}", cli.path.display());
    eprintln!("  {err}");
    process::exit(1);
}
