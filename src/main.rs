use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use structopt::StructOpt;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use weighted_graph_toolkit::input::{self, LabeledGraph};
use weighted_graph_toolkit::{
    bellman_ford, bfs, connected_components, dfs, dijkstra, floyd_warshall, kruskal_mst, prim_mst,
    shortest_path, MSTResult, TraversalResult, Weight,
};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "graph-toolkit",
    about = "Shortest paths, minimum spanning trees and traversals over weighted graphs"
)]
struct Opt {
    /// Graph to load: a `from to weight` edge list, or GFA with --gfa
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Parse the input as GFA; links become unit-weight edges
    #[structopt(long)]
    gfa: bool,

    /// Treat edge list entries as directed edges
    #[structopt(short, long)]
    directed: bool,

    /// Log engine progress to stderr
    #[structopt(short, long)]
    verbose: bool,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// Print the adjacency list
    Show,
    /// Single-source shortest paths, non-negative weights only
    Dijkstra {
        source: String,
        /// Only report the route to this vertex
        #[structopt(long)]
        target: Option<String>,
    },
    /// Single-source shortest paths allowing negative weights
    BellmanFord { source: String },
    /// All-pairs shortest distances
    FloydWarshall,
    /// Minimum spanning tree grown from a start vertex
    Prim { start: String },
    /// Minimum spanning forest
    Kruskal,
    /// Breadth-first visiting order
    Bfs { start: String },
    /// Depth-first visiting order
    Dfs { start: String },
    /// Connected components
    Components,
}

fn init_tracing(verbose: bool) -> Result<(), Box<dyn Error>> {
    let default_level = if verbose {
        "weighted_graph_toolkit=debug"
    } else {
        "weighted_graph_toolkit=warn"
    };

    let filter = EnvFilter::try_from_env("GRAPH_TOOLKIT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}

/// Resolves a vertex given on the command line, by name first and
/// then as a raw index.
fn resolve<W>(labeled: &LabeledGraph<W>, token: &str) -> Result<usize, String> {
    if let Some(ix) = labeled.inv_names.iter().position(|name| name == token) {
        return Ok(ix);
    }
    token
        .parse::<usize>()
        .map_err(|_| format!("unknown vertex `{}`", token))
}

fn show_distance<W: Weight>(distance: Option<W>) -> String {
    match distance {
        Some(d) => d.to_string(),
        None => "unreachable".to_string(),
    }
}

fn show_vertices<W>(labeled: &LabeledGraph<W>, vertices: &[usize], separator: &str) -> String {
    vertices
        .iter()
        .map(|&v| labeled.name(v).unwrap_or("?"))
        .collect::<Vec<_>>()
        .join(separator)
}

fn print_mst<W: Weight>(labeled: &LabeledGraph<W>, mst: &MSTResult<W>) {
    for edge in &mst.edges {
        println!(
            "{}\t{}\t{}",
            labeled.name(edge.from).unwrap_or("?"),
            labeled.name(edge.to).unwrap_or("?"),
            edge.weight
        );
    }
    println!("# total weight: {}", mst.total_weight);
    if mst.disconnected {
        println!("# graph is disconnected; {} tree(s) selected", mst.trees);
    }
}

fn print_traversal<W>(labeled: &LabeledGraph<W>, result: &TraversalResult) {
    println!("{}", show_vertices(labeled, &result.order, " "));
    let unvisited = result.visited.iter().filter(|&&v| !v).count();
    if unvisited > 0 {
        println!("# {} vertices not reached", unvisited);
    }
}

fn run<W: Weight>(labeled: &LabeledGraph<W>, command: &Command) -> Result<(), Box<dyn Error>> {
    let graph = &labeled.graph;

    match command {
        Command::Show => print!("{}", graph),
        Command::Dijkstra {
            source,
            target: Some(target),
        } => {
            let source = resolve(labeled, source)?;
            let target = resolve(labeled, target)?;
            match shortest_path(graph, source, target)? {
                Some(path) => {
                    println!("{}", show_vertices(labeled, &path.vertices, " -> "));
                    println!("# distance: {}", path.distance);
                }
                None => println!("# unreachable"),
            }
        }
        Command::Dijkstra { source, target: None } | Command::BellmanFord { source } => {
            let source = resolve(labeled, source)?;
            let result = match command {
                Command::BellmanFord { .. } => bellman_ford(graph, source)?,
                _ => dijkstra(graph, source)?,
            };
            for v in 0..graph.vertex_count() {
                let route = result
                    .path_to(v)
                    .map(|path| show_vertices(labeled, &path, " -> "))
                    .unwrap_or_default();
                println!(
                    "{}\t{}\t{}",
                    labeled.name(v).unwrap_or("?"),
                    show_distance(result.distance(v)),
                    route
                );
            }
        }
        Command::FloydWarshall => {
            let matrix = floyd_warshall(graph);
            for from in 0..graph.vertex_count() {
                let row: Vec<String> = (0..graph.vertex_count())
                    .map(|to| matrix.get(from, to).map(|d| d.to_string()).unwrap_or_else(|| "-".into()))
                    .collect();
                println!("{}\t{}", labeled.name(from).unwrap_or("?"), row.join("\t"));
            }
            if matrix.has_negative_cycle() {
                println!("# negative cycle detected; distances are not meaningful");
            }
        }
        Command::Prim { start } => {
            let start = resolve(labeled, start)?;
            print_mst(labeled, &prim_mst(graph, start)?);
        }
        Command::Kruskal => print_mst(labeled, &kruskal_mst(graph)),
        Command::Bfs { start } => {
            let start = resolve(labeled, start)?;
            print_traversal(labeled, &bfs(graph, start)?);
        }
        Command::Dfs { start } => {
            let start = resolve(labeled, start)?;
            print_traversal(labeled, &dfs(graph, start)?);
        }
        Command::Components => {
            for component in connected_components(graph) {
                println!("component: {}", show_vertices(labeled, &component, " "));
            }
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();
    init_tracing(opt.verbose)?;

    let file = File::open(&opt.input)?;
    let mut reader = BufReader::new(file);

    if opt.gfa {
        let labeled = input::from_gfa_reader(&mut reader)?;
        run(&labeled, &opt.command)
    } else {
        let labeled: LabeledGraph<i64> = input::from_edge_list_reader(&mut reader, opt.directed)?;
        run(&labeled, &opt.command)
    }
}
