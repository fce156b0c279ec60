use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use runeforge::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Define CLI-specific enums for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusCli {
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelCli {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortCli {
    Original,
    Newest,
    Oldest,
}

/// Inspect runeforge workflow graphs and execution logs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a workflow graph (or a workflow record with `definitionJson`)
    Validate {
        /// Path to the graph JSON file
        graph_path: String,
        /// Accept node types the registry does not know
        #[arg(long)]
        allow_unknown_types: bool,
        /// Map a foreign tag onto a registered one, as `alias=target`
        #[arg(long = "alias", value_parser = parse_alias)]
        aliases: Vec<(String, String)>,
    },
    /// Print an outline of a workflow graph
    Describe {
        /// Path to the graph JSON file
        graph_path: String,
    },
    /// List the node type catalog
    Types,
    /// Filter and print execution logs
    Logs {
        /// Path to a JSON array of execution logs
        logs_path: String,
        /// Only logs of this workflow definition
        #[arg(long)]
        workflow: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusCli>,
        /// Earliest start time (RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        from: Option<DateTime<Utc>>,
        /// Latest start time (RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        to: Option<DateTime<Utc>>,
        /// Hide entries below this level
        #[arg(long, value_enum)]
        min_level: Option<LevelCli>,
        /// Only entries emitted by this node
        #[arg(long)]
        node: Option<String>,
        #[arg(long, value_enum, default_value = "original")]
        sort: SortCli,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Validate {
            graph_path,
            allow_unknown_types,
            aliases,
        } => run_validate(&graph_path, allow_unknown_types, &aliases),
        Command::Describe { graph_path } => run_describe(&graph_path),
        Command::Types => run_types(),
        Command::Logs {
            logs_path,
            workflow,
            status,
            from,
            to,
            min_level,
            node,
            sort,
        } => {
            let mut filter = LogFilter::new();
            if let Some(id) = workflow {
                filter = filter.for_workflow(id);
            }
            if let Some(status) = status {
                filter = filter.with_status(match status {
                    StatusCli::Running => ExecutionStatus::Running,
                    StatusCli::Completed => ExecutionStatus::Completed,
                    StatusCli::Failed => ExecutionStatus::Failed,
                });
            }
            filter = match (from, to) {
                (Some(from), Some(to)) => filter
                    .between(from, to)
                    .unwrap_or_else(|e| exit_with_error(&e.to_string())),
                (Some(from), None) => filter.since(from),
                (None, Some(to)) => filter.until(to),
                (None, None) => filter,
            };

            let mut entry_filter = EntryFilter::new();
            if let Some(level) = min_level {
                entry_filter = entry_filter.at_least(match level {
                    LevelCli::Debug => LogLevel::Debug,
                    LevelCli::Info => LogLevel::Info,
                    LevelCli::Warn => LogLevel::Warn,
                    LevelCli::Error => LogLevel::Error,
                });
            }
            if let Some(node) = node {
                entry_filter = entry_filter.for_node(node);
            }
            let sort = match sort {
                SortCli::Original => LogSort::Original,
                SortCli::Newest => LogSort::NewestFirst,
                SortCli::Oldest => LogSort::OldestFirst,
            };

            run_logs(&logs_path, &filter, &entry_filter, sort);
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_validate(graph_path: &str, allow_unknown_types: bool, aliases: &[(String, String)]) {
    let start = Instant::now();
    let graph = load_graph(graph_path);

    let mut builder = GraphValidator::builder().allow_unknown_types(allow_unknown_types);
    for (alias, target) in aliases {
        builder = builder.with_type_alias(alias, target);
    }
    let validator = builder.build();

    match validator.validate(&graph) {
        Ok(validated) => {
            println!(
                "Graph is valid: {} nodes, {} edges (checked in {:?})",
                validated.nodes().len(),
                validated.edges().len(),
                start.elapsed()
            );
        }
        Err(errors) => {
            println!("Graph is invalid ({} issues):", errors.len());
            for issue in errors.issues() {
                println!("  - {}", issue);
            }
            std::process::exit(1);
        }
    }
}

fn run_describe(graph_path: &str) {
    let graph = load_graph(graph_path);
    let registry = NodeTypeRegistry::new();
    println!("{}", GraphFormatter::new(&registry).format_graph(&graph));
}

fn run_types() {
    let registry = NodeTypeRegistry::new();
    println!("{:<12} {:<16} {:<12} OUTPUTS", "TAG", "ICON", "LABEL");
    for tag in registry.tags() {
        let metadata = registry.resolve(tag);
        println!(
            "{:<12} {:<16} {:<12} {}",
            metadata.tag,
            metadata.icon,
            metadata.label,
            metadata.outputs.ids().join(", ")
        );
    }
}

fn run_logs(logs_path: &str, filter: &LogFilter, entry_filter: &EntryFilter, sort: LogSort) {
    let source = JsonLogSource::from_path(logs_path);
    let logs = source
        .fetch_filtered(filter)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    if logs.is_empty() {
        println!("No execution logs matched.");
        return;
    }

    for log in sort.sort(logs.iter().collect()) {
        let entries = entry_filter.apply(log);
        println!("{}\n", LogFormatter::format_log(log, &entries));
    }
}

fn load_graph(path: &str) -> WorkflowGraph {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read graph file '{}': {}", path, e))
    });
    let value: serde_json::Value = serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse graph JSON: {}", e)));
    value
        .into_graph()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert graph: {}", e)))
}

fn parse_alias(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(alias, target)| (alias.trim().to_string(), target.trim().to_string()))
        .filter(|(alias, target)| !alias.is_empty() && !target.is_empty())
        .ok_or_else(|| format!("expected `alias=target`, got '{}'", raw))
}

fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
