use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use lens_indexer::{list_code_files, read_window, SourceRoot};
use lens_outline::{explain_file, RouteExtractor};
use lens_protocol::{serialize_json_pretty, DeclarationKind};
use lens_search::{DefinitionFinder, RelevanceRanker};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;

pub mod config;
pub mod report;
pub mod workspace;

use config::LensConfig;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "context-lens")]
#[command(about = "Fuzzy navigation and outlines for local source trees", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Operate on this directory (absolute, relative, or ~/...)
    #[arg(long, global = true)]
    folder: Option<String>,

    /// Operate on <clone_root>/<REPO>
    #[arg(long, global = true)]
    repo: Option<String>,

    /// Configuration file (env: CONTEXT_LENS_CONFIG, default: ./context-lens.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print structured JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Log only errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List repositories under the clone root
    Repos,

    /// Fuzzy-search file paths
    Search(SearchArgs),

    /// Recommend files for a feature description
    Recommend(RecommendArgs),

    /// Outline a file: imports, types, functions and a preview
    Explain(FileArgs),

    /// Show a range of lines from a file
    Show(ShowArgs),

    /// Find function definitions by fuzzy name
    #[command(name = "find-function")]
    FindFunction(NameArgs),

    /// Find class/struct/type definitions by fuzzy name
    #[command(name = "find-class")]
    FindClass(NameArgs),

    /// Detect HTTP route registrations
    Routes(RoutesArgs),

    /// List recognised code files
    Files,
}

#[derive(Args)]
struct SearchArgs {
    query: String,

    /// Maximum results to print
    #[arg(long, default_value_t = 15)]
    max_results: usize,
}

#[derive(Args)]
struct RecommendArgs {
    /// Free-text feature description
    #[arg(required = true, num_args = 1..)]
    description: Vec<String>,
}

#[derive(Args)]
struct FileArgs {
    /// Path relative to the target directory
    file: String,
}

#[derive(Args)]
struct ShowArgs {
    file: String,

    /// First line to show (1-based)
    #[arg(long, default_value_t = 1)]
    start: usize,

    /// Number of lines to show
    #[arg(long, default_value_t = 50)]
    lines: usize,
}

#[derive(Args)]
struct NameArgs {
    name: String,
}

#[derive(Args)]
struct RoutesArgs {
    /// Also write <docs_dir>/<repo>_api.md
    #[arg(long)]
    write_docs: bool,
}

struct Session {
    config: LensConfig,
    folder: Option<String>,
    repo: Option<String>,
    json: bool,
}

impl Session {
    fn target(&self) -> Result<SourceRoot> {
        workspace::resolve_target(&self.config, self.folder.as_deref(), self.repo.as_deref())
            .context("Cannot open target directory")
    }

    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            print_stdout(&serialize_json_pretty(value)?)
        } else {
            print_stdout(&text())
        }
    }
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = LensConfig::load(cli.config.as_deref())?;
    let session = Session {
        config,
        folder: cli.folder,
        repo: cli.repo,
        json: cli.json,
    };

    match cli.command {
        Commands::Repos => run_repos(&session)?,
        Commands::Search(args) => run_search(&session, args)?,
        Commands::Recommend(args) => run_recommend(&session, args)?,
        Commands::Explain(args) => run_explain(&session, args)?,
        Commands::Show(args) => run_show(&session, args)?,
        Commands::FindFunction(args) => {
            run_find_definition(&session, DeclarationKind::Function, args)?
        }
        Commands::FindClass(args) => run_find_definition(&session, DeclarationKind::Type, args)?,
        Commands::Routes(args) => run_routes(&session, args)?,
        Commands::Files => run_files(&session)?,
    }

    Ok(())
}

fn run_repos(session: &Session) -> Result<()> {
    let clone_root = &session.config.clone_root;
    let repos = workspace::list_repositories(clone_root).context("Cannot list repositories")?;
    session.emit(&repos, || report::render_repositories(clone_root, &repos))
}

fn run_search(session: &Session, args: SearchArgs) -> Result<()> {
    let root = session.target()?;
    let files = list_code_files(root.path(), &session.config.scan);
    if files.is_empty() && !session.json {
        return print_stdout(&report::render_files(&root.name(), &[]));
    }

    let mut ranker = RelevanceRanker::new(session.config.ranking.clone());
    let results = ranker.search_files(&args.query, &files, None);
    log::info!("{} of {} files match '{}'", results.len(), files.len(), args.query);

    if session.json {
        let shown = &results[..results.len().min(args.max_results)];
        return print_stdout(&serialize_json_pretty(&shown)?);
    }
    print_stdout(&report::render_search(
        &args.query,
        &results,
        args.max_results,
        console::colors_enabled(),
    ))
}

fn run_recommend(session: &Session, args: RecommendArgs) -> Result<()> {
    let root = session.target()?;
    let description = args.description.join(" ");
    let files = list_code_files(root.path(), &session.config.scan);
    if files.is_empty() && !session.json {
        return print_stdout(&report::render_files(&root.name(), &[]));
    }

    let mut ranker = RelevanceRanker::new(session.config.ranking.clone());
    let results = ranker.recommend(&description, &files);
    session.emit(&results, || report::render_recommendations(&description, &results))
}

fn run_explain(session: &Session, args: FileArgs) -> Result<()> {
    let root = session.target()?;
    let explanation = explain_file(&root, &args.file, &session.config.outline)
        .with_context(|| format!("Cannot explain {} in '{}'", args.file, root.name()))?;
    session.emit(&explanation, || report::render_explanation(&explanation))
}

fn run_show(session: &Session, args: ShowArgs) -> Result<()> {
    let root = session.target()?;
    let window = read_window(&root, &args.file, args.start, args.lines)
        .with_context(|| format!("Cannot read {} in '{}'", args.file, root.name()))?;
    session.emit(&window, || report::render_window(&window))
}

fn run_find_definition(session: &Session, kind: DeclarationKind, args: NameArgs) -> Result<()> {
    let root = session.target()?;
    let files = list_code_files(root.path(), &session.config.scan);
    let mut finder = DefinitionFinder::new(session.config.ranking.definition_threshold);
    let matches = finder.find(&files, &args.name, kind);
    session.emit(&matches, || {
        report::render_definitions(kind, &args.name, &root.name(), &matches)
    })
}

fn run_routes(session: &Session, args: RoutesArgs) -> Result<()> {
    let root = session.target()?;
    let extractor = RouteExtractor::new(&session.config.outline, &session.config.scan)?;
    let routes = extractor
        .extract(&root)
        .with_context(|| format!("Cannot scan routes in '{}'", root.name()))?;
    let doc = report::render_api_doc(&root.name(), root.path(), &routes);

    if args.write_docs {
        let docs_dir = &session.config.docs_dir;
        fs::create_dir_all(docs_dir)
            .with_context(|| format!("Failed to create {}", docs_dir.display()))?;
        let doc_path = docs_dir.join(format!("{}_api.md", root.name()));
        fs::write(&doc_path, &doc)
            .with_context(|| format!("Failed to write {}", doc_path.display()))?;
        log::info!(
            "Documented {} endpoint(s) to {}",
            routes.len(),
            doc_path.display()
        );
        if !session.json {
            eprintln!(
                "Documented {} endpoint(s) to {}",
                routes.len(),
                doc_path.display()
            );
        }
    }

    session.emit(&routes, || doc)
}

fn run_files(session: &Session) -> Result<()> {
    let root = session.target()?;
    let files: Vec<String> = list_code_files(root.path(), &session.config.scan)
        .into_iter()
        .map(|file| file.relative)
        .collect();
    session.emit(&files, || report::render_files(&root.name(), &files))
}
