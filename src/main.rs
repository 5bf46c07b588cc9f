//! CLI entry point for documentation cross-referencing and search.
//!
//! Commands: `init`, `config`, `links`, `index`, `search`, `check`.
//! Every command returns an [`ExitCode`]; errors are mapped to the same codes
//! so scripts can tell a broken manifest from an empty search.

use anyhow::Context;
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use gir_xref::check::check_documentation;
use gir_xref::display::{
    THEME, create_coverage_table, create_diagnostics_table, create_help_text,
    create_progress_bar, create_search_table,
};
use gir_xref::io::{ExitCode, JsonResponse, OutputFormat};
use gir_xref::search::render_html;
use gir_xref::{
    IndexBuilder, IndexError, LinkReport, LinkResolver, SearchResults, SearchSession, Settings,
    SymbolManifest, SymbolTable,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{Level, debug, info};
use walkdir::WalkDir;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Cross-reference resolver and search indexer for introspected C libraries
#[derive(Parser)]
#[command(
    name = "gir-xref",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resolve documentation links and build search indices",
    long_about = "Resolve [fragment@endpoint] links in library documentation and build and query its search index.",
    next_line_help = true,
    styles = clap_cargo_style(),
    after_help = create_help_text()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show detailed progress information
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up .gir-xref directory with default configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Display active settings
    Config,

    /// Resolve documentation links in Markdown files
    Links {
        /// Symbol manifest (JSON) describing the namespaces
        manifest: PathBuf,

        /// Markdown files or directories containing them
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Namespace the documents belong to (defaults to the primary)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Write rewritten documents here instead of printing them
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Fail when any link does not resolve (overrides config)
        #[arg(long)]
        fatal_warnings: bool,

        /// Number of threads to use (overrides config)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Show progress while resolving
        #[arg(short, long)]
        progress: bool,
    },

    /// Build the search index of the primary namespace
    Index {
        /// Symbol manifest (JSON) describing the namespaces
        manifest: PathBuf,

        /// Where to write the index (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Query a search index
    Search {
        /// Index file written by `index`
        index: PathBuf,

        /// Query text, optionally prefixed by a kind filter (`signal:clicked`)
        #[arg(required = true)]
        query: Vec<String>,

        /// Maximum number of results (overrides config)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output in JSON format
        #[arg(long, conflicts_with = "html")]
        json: bool,

        /// Output the HTML result fragment
        #[arg(long)]
        html: bool,
    },

    /// List undocumented symbols of the primary namespace
    Check {
        /// Symbol manifest (JSON) describing the namespaces
        manifest: PathBuf,
    },
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            let error = IndexError::ConfigError {
                reason: e.to_string(),
            };
            return report_error(&error.into()).into();
        }
    };

    init_logging(cli.verbose, settings.debug);
    debug!("loaded settings: {settings:?}");

    let result = match cli.command {
        Commands::Init { force } => run_init(force),
        Commands::Config => run_config(&settings),
        Commands::Links {
            manifest,
            paths,
            namespace,
            output_dir,
            fatal_warnings,
            threads,
            progress,
        } => run_links(
            &settings,
            LinksArgs {
                manifest,
                paths,
                namespace,
                output_dir,
                fatal_warnings: fatal_warnings || settings.links.fatal_warnings,
                threads: threads.unwrap_or(settings.parallel_threads),
                progress,
            },
        ),
        Commands::Index { manifest, output } => {
            let output = output.unwrap_or_else(|| settings.index.output.clone());
            run_index(&settings, &manifest, &output)
        }
        Commands::Search {
            index,
            query,
            limit,
            json,
            html,
        } => {
            let limit = limit.unwrap_or(settings.search.max_results);
            run_search(&index, &query.join(" "), limit, json, html).await
        }
        Commands::Check { manifest } => run_check(&manifest),
    };

    match result {
        Ok(code) => code.into(),
        Err(e) => report_error(&e).into(),
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings, Box<figment::Error>> {
    match path {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
}

/// Logs go to stderr so rewritten documents and JSON stay clean on stdout.
fn init_logging(verbose: bool, debug: bool) {
    let level = if debug {
        Level::DEBUG
    } else if verbose {
        Level::INFO
    } else {
        Level::ERROR
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn report_error(error: &anyhow::Error) -> ExitCode {
    eprintln!("{}", THEME.error_with_icon(&format!("{error:#}")));
    match error.downcast_ref::<IndexError>() {
        Some(index_error) => {
            for suggestion in index_error.recovery_suggestions() {
                eprintln!("  {}", THEME.apply(&THEME.dim, suggestion));
            }
            ExitCode::from_error(index_error)
        }
        None => ExitCode::GeneralError,
    }
}

fn load_table(manifest: &Path) -> anyhow::Result<SymbolTable> {
    let table = SymbolManifest::load(manifest)?.into_table()?;
    info!(
        "loaded {} symbols across {} namespaces from {}",
        table.len(),
        table.namespaces().count(),
        manifest.display()
    );
    Ok(table)
}

fn run_init(force: bool) -> anyhow::Result<ExitCode> {
    let path = Settings::init_config_file(force)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("could not write configuration")?;
    println!(
        "{}",
        THEME.success_with_icon(&format!("Created configuration file at: {}", path.display()))
    );
    Ok(ExitCode::Success)
}

fn run_config(settings: &Settings) -> anyhow::Result<ExitCode> {
    println!("{}", THEME.apply(&THEME.header, "Current Configuration:"));
    println!("{}", "=".repeat(50));
    println!("{}", settings.to_toml()?);
    Ok(ExitCode::Success)
}

struct LinksArgs {
    manifest: PathBuf,
    paths: Vec<PathBuf>,
    namespace: Option<String>,
    output_dir: Option<PathBuf>,
    fatal_warnings: bool,
    threads: usize,
    progress: bool,
}

/// A document to rewrite: where it was read from and where it goes.
struct Document {
    source: PathBuf,
    relative: PathBuf,
    text: String,
}

fn collect_documents(paths: &[PathBuf]) -> anyhow::Result<Vec<Document>> {
    let mut documents = Vec::new();
    for root in paths {
        if root.is_file() {
            let relative = root
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| root.clone());
            documents.push(read_document(root, relative)?);
            continue;
        }
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walking {}", root.display()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
            documents.push(read_document(path, relative)?);
        }
    }
    Ok(documents)
}

fn read_document(path: &Path, relative: PathBuf) -> anyhow::Result<Document> {
    let text = std::fs::read_to_string(path).map_err(|source| IndexError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Document {
        source: path.to_path_buf(),
        relative,
        text,
    })
}

fn run_links(settings: &Settings, args: LinksArgs) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let table = load_table(&args.manifest)?;

    let context = match &args.namespace {
        Some(name) => table
            .namespace_id(name)
            .ok_or_else(|| {
                IndexError::General(format!("namespace '{name}' is not declared in the manifest"))
            })?,
        None => table.primary(),
    };

    let documents = collect_documents(&args.paths)?;
    if documents.is_empty() {
        eprintln!("{}", THEME.warning_with_icon("No Markdown documents found"));
        return Ok(ExitCode::NotFound);
    }

    let resolver = LinkResolver::new(&table).with_options(settings.link_options());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads.max(1))
        .build()?;
    let pb = create_progress_bar(documents.len() as u64, "documents", args.progress);
    let reports: Vec<LinkReport> = pool.install(|| {
        documents
            .par_iter()
            .map(|doc| {
                let report = resolver.resolve_links(&doc.text, context);
                pb.inc(1);
                report
            })
            .collect()
    });
    pb.finish_and_clear();

    let mut unresolved = 0;
    for (doc, report) in documents.iter().zip(&reports) {
        if report.has_diagnostics() {
            unresolved += report.diagnostics.len();
            let file = doc.source.display().to_string();
            eprintln!("{}", create_diagnostics_table(&file, &report.diagnostics));
        }

        match &args.output_dir {
            Some(dir) => {
                let target = dir.join(&doc.relative);
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("creating {}", parent.display()))?;
                }
                std::fs::write(&target, &report.text).map_err(|source| {
                    IndexError::FileWrite {
                        path: target.clone(),
                        source,
                    }
                })?;
            }
            None => print!("{}", report.text),
        }
    }

    let summary = format!(
        "Resolved links in {} documents in {:.2?} ({unresolved} unresolved)",
        documents.len(),
        start.elapsed()
    );
    if unresolved == 0 {
        eprintln!("{}", THEME.success_with_icon(&summary));
        Ok(ExitCode::Success)
    } else if args.fatal_warnings {
        eprintln!("{}", THEME.error_with_icon(&summary));
        Ok(ExitCode::BlockingError)
    } else {
        eprintln!("{}", THEME.warning_with_icon(&summary));
        Ok(ExitCode::Success)
    }
}

fn run_index(settings: &Settings, manifest: &Path, output: &Path) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let table = load_table(manifest)?;

    let index = IndexBuilder::new(&table)
        .with_generator(settings.index.generator_name.clone())
        .build();
    index.save(output)?;

    println!(
        "{}",
        THEME.success_with_icon(&format!(
            "Indexed {} symbols ({} terms) of {}-{} to {} in {:.2?}",
            index.len(),
            index.terms.len(),
            index.meta.ns,
            index.meta.version,
            THEME.apply(&THEME.path, output.display()),
            start.elapsed()
        ))
    );
    Ok(ExitCode::Success)
}

async fn run_search(
    index: &Path,
    query: &str,
    limit: usize,
    json: bool,
    html: bool,
) -> anyhow::Result<ExitCode> {
    let format = OutputFormat::from_json_flag(json);
    let mut session = match SearchSession::open(index).await {
        Ok(session) => session.with_max_results(limit),
        Err(e) if format.is_json() => {
            println!("{}", serde_json::to_string_pretty(&JsonResponse::from_error(&e))?);
            return Ok(ExitCode::from_error(&e));
        }
        Err(e) => return Err(e.into()),
    };

    let results = match session.search(query) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("{}", THEME.error_with_icon(&e.to_string()));
            return Ok(ExitCode::from_session_error(&e));
        }
    };

    if html {
        println!("{}", render_html(results));
    } else if format.is_json() {
        let body = match results {
            SearchResults::Matches { hits, .. } => serde_json::to_string_pretty(
                &JsonResponse::success(hits)
                    .with_message(format!("Found {} results for '{query}'", hits.len())),
            )?,
            SearchResults::NoResults { query } => {
                serde_json::to_string_pretty(&JsonResponse::no_results(query))?
            }
        };
        println!("{body}");
    } else {
        match results {
            SearchResults::Matches { hits, .. } => println!("{}", create_search_table(hits)),
            SearchResults::NoResults { query } => eprintln!(
                "{}",
                THEME.warning_with_icon(&format!("No results found for '{query}'"))
            ),
        }
    }

    Ok(ExitCode::from_found(!results.is_empty()))
}

fn run_check(manifest: &Path) -> anyhow::Result<ExitCode> {
    let table = load_table(manifest)?;
    let issues = check_documentation(&table);

    if issues.is_empty() {
        println!(
            "{}",
            THEME.success_with_icon(&format!(
                "All {} symbols of {} are documented",
                table.symbols_in(table.primary()).count(),
                table.primary_namespace().versioned_name()
            ))
        );
        return Ok(ExitCode::Success);
    }

    for issue in &issues {
        debug!("{issue}");
    }
    println!("{}", create_coverage_table(&issues));
    Ok(ExitCode::NotFound)
}
