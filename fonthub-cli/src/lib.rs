//! fonthub CLI

use std::env;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

use fonthub_core::database::FontDatabase;
use fonthub_core::loader::{LoadOptions, LoadPolicy, LoadReport};
use fonthub_core::output::{write_json_pretty, write_ndjson};
use fonthub_core::query::{parse_value_list, Selector};
use fonthub_core::record::FontRecord;

pub mod logging;
pub mod server;

/// Directory used when neither `--metadata-dir` nor the env override is set.
const DEFAULT_METADATA_DIR: &str = "metadataset";
const METADATA_DIR_ENV: &str = "FONTHUB_METADATA_DIR";

/// CLI entrypoint for fonthub.
#[derive(Debug, Parser)]
#[command(name = "fonthub", about = "Font metadata index and lookup service")]
pub struct Cli {
    /// Default log filter when RUST_LOG is unset (e.g. info, debug, fonthub_core=debug)
    #[arg(long = "log-level", global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the metadata set and serve it over HTTP
    Serve(ServeArgs),
    /// List every font, optionally limited to one category
    List(ListArgs),
    /// List fonts matching width/weight/style/language values
    Select(SelectArgs),
    /// Print one font's record as JSON
    Show(ShowArgs),
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Directory of JSON metadata documents (default: $FONTHUB_METADATA_DIR or ./metadataset)
    #[arg(short = 'd', long = "metadata-dir", value_hint = ValueHint::DirPath)]
    metadata_dir: Option<PathBuf>,

    /// Follow symlinks while walking the metadata directory
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,

    /// Skip unreadable or malformed documents instead of aborting the load
    #[arg(long = "keep-going", action = ArgAction::SetTrue)]
    keep_going: bool,

    /// Number of threads used to decode documents
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Format output as padded columns
    #[arg(long = "columns", action = ArgAction::SetTrue)]
    columns: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct ServeArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Address to listen on
    #[arg(short = 'b', long = "bind", default_value = "0.0.0.0:8080")]
    bind: String,

    /// Directory holding index.html and static assets
    #[arg(long = "static-dir", default_value = "static", value_hint = ValueHint::DirPath)]
    static_dir: PathBuf,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Only list fonts in this category
    #[arg(short = 'c', long = "category")]
    category: Option<String>,
}

#[derive(Debug, Args)]
struct SelectArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Accept fonts offering any of these widths
    ///
    /// Comma-separated values are split and trimmed; matching is exact and case-sensitive.
    #[arg(short = 'w', long = "width", value_hint = ValueHint::Other)]
    widths: Vec<String>,

    /// Accept fonts offering any of these weights
    ///
    /// Comma-separated values are split and trimmed; matching is exact and case-sensitive.
    #[arg(short = 'W', long = "weight", value_hint = ValueHint::Other)]
    weights: Vec<String>,

    /// Accept fonts offering any of these styles
    ///
    /// Comma-separated values are split and trimmed; matching is exact and case-sensitive.
    #[arg(short = 's', long = "style", value_hint = ValueHint::Other)]
    styles: Vec<String>,

    /// Accept fonts supporting any of these languages
    ///
    /// Comma-separated values are split and trimmed; matching is exact and case-sensitive.
    #[arg(short = 'l', long = "language", value_hint = ValueHint::Other)]
    languages: Vec<String>,
}

#[derive(Debug, Args)]
struct ShowArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Exact font name
    name: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level)?;

    match cli.command {
        Command::Serve(args) => run_serve(args),
        Command::List(args) => run_list(args),
        Command::Select(args) => run_select(args),
        Command::Show(args) => run_show(args),
    }
}

fn run_serve(args: ServeArgs) -> Result<()> {
    let (db, _) = load_database(&args.source)?;
    let db = Arc::new(db);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    runtime.block_on(server::serve(&args.bind, db, &args.static_dir))
}

fn run_list(args: ListArgs) -> Result<()> {
    let (db, _) = load_database(&args.source)?;
    let records = match &args.category {
        Some(category) => db.by_category(category),
        None => db.all(),
    };
    emit(&records, &args.output)
}

fn run_select(args: SelectArgs) -> Result<()> {
    let (db, _) = load_database(&args.source)?;
    let selector = build_selector(&args);
    let records = db.by_selector(&selector);
    emit(&records, &args.output)
}

fn run_show(args: ShowArgs) -> Result<()> {
    let (db, _) = load_database(&args.source)?;
    let record = db
        .get(&args.name)
        .ok_or_else(|| anyhow!("no font named {}", args.name))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, record)?;
    writeln!(handle)?;
    Ok(())
}

fn load_database(source: &SourceArgs) -> Result<(FontDatabase, LoadReport)> {
    let root = resolve_metadata_dir(&source.metadata_dir);
    let opts = load_options(source)?;
    FontDatabase::load(&root, &opts)
}

fn load_options(source: &SourceArgs) -> Result<LoadOptions> {
    if matches!(source.jobs, Some(0)) {
        return Err(anyhow!("jobs must be at least 1 when provided"));
    }

    Ok(LoadOptions {
        follow_symlinks: source.follow_symlinks,
        jobs: source.jobs,
        policy: if source.keep_going {
            LoadPolicy::SkipInvalid
        } else {
            LoadPolicy::FailFast
        },
    })
}

fn resolve_metadata_dir(explicit: &Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.clone();
    }

    match env::var(METADATA_DIR_ENV) {
        Ok(raw) if !raw.trim().is_empty() => PathBuf::from(raw),
        _ => PathBuf::from(DEFAULT_METADATA_DIR),
    }
}

fn build_selector(args: &SelectArgs) -> Selector {
    Selector::new()
        .with_widths(parse_value_list(&args.widths))
        .with_weights(parse_value_list(&args.weights))
        .with_styles(parse_value_list(&args.styles))
        .with_languages(parse_value_list(&args.languages))
}

fn emit(records: &[FontRecord], output: &OutputArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = match output.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => handle.is_terminal(),
    };

    if output.ndjson {
        write_ndjson(records, &mut handle)?;
    } else if output.json {
        write_json_pretty(records, &mut handle)?;
    } else if output.columns {
        write_columns(records, &mut handle, use_color)?;
    } else {
        write_plain(records, &mut handle, use_color)?;
    }

    Ok(())
}

fn write_plain(records: &[FontRecord], mut w: impl Write, color: bool) -> Result<()> {
    for record in records {
        let rendered = apply_color(&record.name, color, AnsiColor::Cyan);
        writeln!(w, "{rendered}")?;
    }
    Ok(())
}

fn write_columns(records: &[FontRecord], mut w: impl Write, color: bool) -> Result<()> {
    let mut rows: Vec<(String, String, String)> = records
        .iter()
        .map(|r| {
            let release = match (r.license.is_empty(), r.version.is_empty()) {
                (false, false) => format!("{} {}", r.license, r.version),
                (false, true) => r.license.clone(),
                (true, false) => r.version.clone(),
                (true, true) => "-".to_string(),
            };

            let attrs = format!(
                "widths:{:<2} weights:{:<2} styles:{:<2} langs:{:<2}",
                r.widths.len(),
                r.weights.len(),
                r.styles.len(),
                r.languages.len(),
            );

            (r.name.clone(), release, attrs)
        })
        .collect();

    let name_width = rows
        .iter()
        .map(|r| r.0.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(0, 80);
    let release_width = rows
        .iter()
        .map(|r| r.1.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(0, 40);

    for (name, release, attrs) in rows.drain(..) {
        let padded_name = format!("{:<name_width$}", name);
        let padded_release = format!("{:<release_width$}", release);
        let rendered_name = apply_color(&padded_name, color, AnsiColor::Cyan);
        let rendered_release = apply_color(&padded_release, color, AnsiColor::Yellow);
        let rendered_attrs = apply_color(&attrs, color, AnsiColor::Green);

        writeln!(w, "{rendered_name}  {rendered_release}  {rendered_attrs}")?;
    }

    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}
