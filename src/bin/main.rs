//! ActivityStreams Collection CLI
//!
//! Command-line tool for inspecting and building collections in expanded
//! JSON-LD form.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use activitystreams_collections::{
    Collection, CollectionBuilder, Document, Entry, ModelError, Reasoner, VocabularyConfig,
};

#[derive(Parser)]
#[command(name = "as-collection")]
#[command(about = "Inspect and build ActivityStreams collections in expanded JSON-LD")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a collection document
    Inspect(InspectArgs),
    /// Build a collection document
    Build(BuildArgs),
}

#[derive(Args)]
struct InspectArgs {
    /// Path to an expanded JSON-LD document
    source: PathBuf,

    /// Vocabulary configuration (JSON)
    #[arg(long)]
    vocab: Option<PathBuf>,
}

#[derive(Args)]
struct BuildArgs {
    /// @id of the collection
    #[arg(long)]
    id: Option<String>,

    /// Additional types (compact or absolute), can be repeated
    #[arg(long = "type", value_name = "TYPE")]
    types: Vec<String>,

    /// Display name
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    total_items: Option<String>,

    #[arg(long)]
    items_per_page: Option<String>,

    /// Item IRIs, can be repeated
    #[arg(long = "item", value_name = "IRI")]
    items: Vec<String>,

    /// Store the items as an ordered list
    #[arg(long)]
    ordered: bool,

    #[arg(long)]
    current: Option<String>,

    #[arg(long)]
    next: Option<String>,

    #[arg(long)]
    prev: Option<String>,

    #[arg(long)]
    first: Option<String>,

    #[arg(long)]
    last: Option<String>,

    #[arg(long)]
    self_link: Option<String>,

    /// Vocabulary configuration (JSON)
    #[arg(long)]
    vocab: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

/// Default vocabulary, extended by a configuration file if given
fn load_reasoner(vocab: Option<&PathBuf>) -> Result<Arc<Reasoner>, ModelError> {
    let reasoner = match vocab {
        Some(path) => {
            info!(path = %path.display(), "loading vocabulary configuration");
            Reasoner::from_config(&VocabularyConfig::load(path)?)?
        }
        None => Reasoner::new(),
    };
    Ok(Arc::new(reasoner))
}

/// Write output to file or stdout
fn write_output(content: &str, output: Option<&PathBuf>) -> Result<(), ModelError> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            info!(path = %path.display(), "wrote collection");
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

fn describe(entry: &Entry) -> String {
    match entry {
        Entry::Id(id) => id.clone(),
        Entry::Node(doc) => doc.id().unwrap_or("(blank node)").to_string(),
        Entry::Literal(lit) => lit.value.to_string(),
        Entry::List(items) => format!("(list of {})", items.len()),
    }
}

fn run_inspect(args: InspectArgs) -> Result<(), ModelError> {
    if !args.source.is_file() {
        return Err(ModelError::InvalidPath(args.source));
    }
    let reasoner = load_reasoner(args.vocab.as_ref())?;
    let content = fs::read_to_string(&args.source)?;
    let collection = Collection::new(Document::from_json_str(&content)?, reasoner, None);

    let compacted: Vec<String> = collection
        .types()
        .iter()
        .map(|t| collection.reasoner().compact(t))
        .collect();

    println!("id:           {}", collection.id().unwrap_or_default());
    println!("types:        {}", compacted.join(", "));
    println!("totalItems:   {}", collection.total_items());
    println!("itemsPerPage: {}", collection.items_per_page());
    println!("ordered:      {}", collection.ordered());

    let links = [
        ("current", collection.current()),
        ("next", collection.next()),
        ("prev", collection.prev()),
        ("first", collection.first()),
        ("last", collection.last()),
        ("self", collection.self_link()),
    ];
    for (label, link) in links {
        if let Some(entry) = link {
            println!("{:<14}{}", format!("{}:", label), describe(&entry));
        }
    }

    match collection.items() {
        Some(items) => {
            println!("items:        {}", items.len());
            for (i, item) in items.iter().enumerate() {
                println!("  [{}] {}", i, describe(item));
            }
        }
        None => println!("items:        0"),
    }
    Ok(())
}

fn run_build(args: BuildArgs) -> Result<(), ModelError> {
    let reasoner = load_reasoner(args.vocab.as_ref())?;

    // Validate extra types up front so a typo is an error, not a stray IRI
    let types = args
        .types
        .iter()
        .map(|t| reasoner.expand(t))
        .collect::<Result<Vec<_>, _>>()?;

    let mut builder = CollectionBuilder::new(Arc::clone(&reasoner), &types, None);

    if let Some(id) = &args.id {
        builder.id(id);
    }
    if let Some(name) = &args.name {
        builder.name(name);
    }
    if let Some(n) = args.total_items {
        builder.total_items(n)?;
    }
    if let Some(n) = args.items_per_page {
        builder.items_per_page(n)?;
    }

    if let Some(iri) = args.current {
        builder.current(iri);
    }
    if let Some(iri) = args.next {
        builder.next(iri);
    }
    if let Some(iri) = args.prev {
        builder.prev(iri);
    }
    if let Some(iri) = args.first {
        builder.first(iri);
    }
    if let Some(iri) = args.last {
        builder.last(iri);
    }
    if let Some(iri) = args.self_link {
        builder.self_link(iri);
    }

    if args.ordered {
        builder.ordered_items(args.items)?;
    } else {
        builder.items(args.items)?;
    }

    let collection = builder.build();
    info!(
        total_items = collection.total_items(),
        ordered = collection.ordered(),
        "built collection"
    );

    let output = collection.to_json_string(args.pretty)?;
    write_output(&output, args.output.as_ref())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect(args) => run_inspect(args),
        Commands::Build(args) => run_build(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
