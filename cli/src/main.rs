//! Santok Graph CLI: build, inspect and query knowledge graph snapshots

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use santok_graph::{
    load_snapshot, save_snapshot, Config, Direction, Edge, GraphNode, GraphStatistics, GraphStore,
    PathOptions, PathResult, RelationType, SnapshotFormat,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "santok-graph", version, about = "Santok knowledge graph CLI")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log filter, overriding the configured level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the animals and sports demo graph
    Demo {
        /// Save the resulting graph as a snapshot
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Show statistics for a snapshot
    Stats { snapshot: PathBuf },
    /// Find a path between two nodes of a snapshot
    Path {
        snapshot: PathBuf,
        from: String,
        to: String,

        /// Maximum number of hops
        #[arg(long)]
        max_depth: Option<usize>,

        /// Follow edges from source to target only
        #[arg(long)]
        directed: bool,

        /// Minimise total edge weight instead of hop count
        #[arg(long)]
        weighted: bool,

        /// Only traverse edges of this relation
        #[arg(long)]
        relation: Option<RelationType>,
    },
    /// List the edges of a node
    Edges {
        snapshot: PathBuf,
        id: String,

        #[arg(long)]
        relation: Option<RelationType>,

        /// List edges pointing at the node instead
        #[arg(long)]
        incoming: bool,
    },
    /// Start an interactive shell, optionally over a snapshot
    Shell { snapshot: Option<PathBuf> },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_logging(&config.log_level);
    debug!("Using configuration {:?}", config);

    execute(cli.command, &config, cli.format)
}

fn execute(command: Commands, config: &Config, format: OutputFormat) -> Result<()> {
    match command {
        Commands::Demo { save } => run_demo(config, save.as_deref(), format),
        Commands::Stats { snapshot } => {
            let store = open_snapshot(&snapshot, config)?;
            print_stats(&store.get_stats(), format)
        }
        Commands::Path {
            snapshot,
            from,
            to,
            max_depth,
            directed,
            weighted,
            relation,
        } => {
            let store = open_snapshot(&snapshot, config)?;
            let options = PathOptions {
                max_depth,
                direction: if directed { Direction::Outgoing } else { Direction::Both },
                relation,
            };
            let result = search_path(&store, &from, &to, &options, weighted)?;
            print_path(&store, &result, format)
        }
        Commands::Edges {
            snapshot,
            id,
            relation,
            incoming,
        } => {
            let store = open_snapshot(&snapshot, config)?;
            print_edges(&list_edges(&store, &id, relation, incoming), format)
        }
        Commands::Shell { snapshot } => run_shell(config, snapshot.as_deref(), format),
    }
}

fn search_path(
    store: &GraphStore,
    from: &str,
    to: &str,
    options: &PathOptions,
    weighted: bool,
) -> Result<PathResult> {
    let result = if weighted {
        store.find_weighted_path(from, to, options)?
    } else {
        store.find_path_with(from, to, options)?
    };
    Ok(result)
}

fn list_edges<'a>(
    store: &'a GraphStore,
    id: &str,
    relation: Option<RelationType>,
    incoming: bool,
) -> Vec<&'a Edge> {
    if incoming {
        store.get_incoming_edges(id, relation)
    } else {
        store.get_edges(id, relation)
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_snapshot(path: &Path, config: &Config) -> Result<GraphStore> {
    let format = SnapshotFormat::for_path(path, config.snapshot_format);
    load_snapshot(path, format, config.graph)
        .with_context(|| format!("failed to load snapshot {}", path.display()))
}

fn write_snapshot(store: &GraphStore, path: &Path, config: &Config) -> Result<()> {
    let format = SnapshotFormat::for_path(path, config.snapshot_format);
    save_snapshot(store, path, format)
        .with_context(|| format!("failed to save snapshot {}", path.display()))
}

fn add_animals(store: &mut GraphStore) -> Result<()> {
    store.add_node(GraphNode::new("uid_dog", "dog").with_type("entity"))?;
    store.add_node(GraphNode::new("uid_animal", "animal").with_type("concept"))?;
    store.add_node(GraphNode::new("uid_cat", "cat").with_type("entity"))?;

    store.add_edge("uid_dog", "uid_animal", RelationType::IsA)?;
    store.add_edge("uid_cat", "uid_animal", RelationType::IsA)?;
    Ok(())
}

fn add_sports(store: &mut GraphStore) -> Result<()> {
    store.add_node(GraphNode::new("uid_cricket", "cricket").with_type("entity"))?;
    store.add_node(GraphNode::new("uid_sport", "sport").with_type("concept"))?;
    store.add_node(GraphNode::new("uid_tennis", "tennis").with_type("entity"))?;

    store.add_edge("uid_cricket", "uid_sport", RelationType::IsA)?;
    store.add_edge("uid_tennis", "uid_sport", RelationType::IsA)?;
    Ok(())
}

fn run_demo(config: &Config, save: Option<&Path>, format: OutputFormat) -> Result<()> {
    let mut store = GraphStore::with_config(config.graph);

    // First domain
    add_animals(&mut store)?;
    print_stats(&store.get_stats(), format)?;

    // Second domain, disjoint ids
    add_sports(&mut store)?;
    print_stats(&store.get_stats(), format)?;

    let path = store.find_path_with("uid_dog", "uid_cat", &PathOptions::default())?;
    print_path(&store, &path, format)?;

    if let Some(path) = save {
        write_snapshot(&store, path, config)?;
        println!("Saved snapshot to {}", path.display());
    }
    Ok(())
}

fn run_shell(config: &Config, snapshot: Option<&Path>, format: OutputFormat) -> Result<()> {
    let mut store = match snapshot {
        Some(path) => open_snapshot(path, config)?,
        None => GraphStore::with_config(config.graph),
    };

    println!("Santok Graph Shell");
    println!("Type :help for commands, :quit to exit.\n");

    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        eprint!("santok> ");

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed {
            ":quit" | ":exit" | ":q" => break,
            ":help" | ":h" => print_shell_help(),
            command => {
                if let Err(e) = run_shell_command(&mut store, config, command, format) {
                    eprintln!("Error: {:#}", e);
                }
            }
        }
    }

    println!("Bye!");
    Ok(())
}

fn print_shell_help() {
    println!("Commands:");
    println!("  node <id> <label> [type]               Add a node");
    println!("  edge <src> <dst> <RELATION> [weight]   Add an edge");
    println!("  path <from> <to>                       Shortest path");
    println!("  edges <id>                             Outgoing edges");
    println!("  stats                                  Graph statistics");
    println!("  save <path>                            Write a snapshot");
    println!("  :quit                                  Exit shell");
}

fn run_shell_command(
    store: &mut GraphStore,
    config: &Config,
    command: &str,
    format: OutputFormat,
) -> Result<()> {
    let args: Vec<&str> = command.split_whitespace().collect();

    match args.as_slice() {
        ["node", id, label] => store.add_node(GraphNode::new(*id, *label))?,
        ["node", id, label, node_type] => {
            store.add_node(GraphNode::new(*id, *label).with_type(*node_type))?
        }
        ["edge", source, target, relation] => {
            store.add_edge(*source, *target, relation.parse::<RelationType>()?)?
        }
        ["edge", source, target, relation, weight] => store.add_weighted_edge(
            *source,
            *target,
            relation.parse::<RelationType>()?,
            weight.parse::<f64>().context("weight must be a number")?,
        )?,
        ["path", from, to] => {
            let result = store.find_path_with(from, to, &PathOptions::default())?;
            print_path(store, &result, format)?
        }
        ["edges", id] => print_edges(&store.get_edges(id, None), format)?,
        ["stats"] => print_stats(&store.get_stats(), format)?,
        ["save", path] => write_snapshot(store, Path::new(path), config)?,
        _ => bail!("unrecognized command: {} (try :help)", command),
    }

    Ok(())
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn print_stats(stats: &GraphStatistics, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(stats)?),
        OutputFormat::Table => {
            let mut table = new_table();
            table.set_header(vec!["Metric", "Count"]);
            table.add_row(vec!["nodes".to_string(), stats.node_count.to_string()]);
            table.add_row(vec!["edges".to_string(), stats.edge_count.to_string()]);
            for (node_type, count) in &stats.node_types {
                table.add_row(vec![format!("type {}", node_type), count.to_string()]);
            }
            for (relation, count) in &stats.relation_types {
                table.add_row(vec![format!("relation {}", relation), count.to_string()]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

fn print_path(store: &GraphStore, result: &PathResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Table => {
            let mut table = new_table();
            table.set_header(vec!["Step", "Id", "Label"]);
            for (step, id) in result.path.iter().enumerate() {
                let label = store.get_node(id).map(|n| n.label.as_str()).unwrap_or("-");
                table.add_row(vec![step.to_string(), id.to_string(), label.to_string()]);
            }
            println!("{}", table);
            println!("{} hop(s), cost {}", result.hops(), result.cost);
        }
    }
    Ok(())
}

fn print_edges(edges: &[&Edge], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(edges)?),
        OutputFormat::Table => {
            if edges.is_empty() {
                println!("(no edges)");
                return Ok(());
            }

            let mut table = new_table();
            table.set_header(vec!["Source", "Relation", "Target", "Weight"]);
            for edge in edges {
                table.add_row(vec![
                    edge.source.to_string(),
                    edge.relation.to_string(),
                    edge.target.to_string(),
                    edge.weight.to_string(),
                ]);
            }
            println!("{}", table);
            println!("{} edge(s)", edges.len());
        }
    }
    Ok(())
}
