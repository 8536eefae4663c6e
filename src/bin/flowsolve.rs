use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use generic_graph_flows::{
    hungarian::Assignment,
    matching::Matching,
    max_flow::{max_flow, MaxFlow, MaxFlowAlgorithm},
    parser::{read_bipartite, read_cost_matrix, FlowInstance},
    GraphError,
};
use log::LevelFilter;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "flowsolve", about = "Max-flow, matching and assignment solver")]
enum Args {
    /// Maximum flow of a DIMACS `p max` instance
    Flow {
        input: PathBuf,

        #[structopt(short, long, default_value = "edmonds-karp")]
        algorithm: MaxFlowAlgorithm,

        /// Also print the edges of a minimum cut
        #[structopt(short, long)]
        min_cut: bool,
    },
    /// Minimum-cost assignment of a square cost matrix, one row per line
    Assign { input: PathBuf },
    /// Maximum bipartite matching of a `p match L R M` instance
    Match {
        input: PathBuf,

        #[structopt(short, long, default_value = "edmonds-karp")]
        algorithm: MaxFlowAlgorithm,
    },
}

// Mimalloc allocator
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn init_logger() {
    let start = Instant::now();
    env_logger::Builder::new()
        .filter_level(match () {
            #[cfg(feature = "verbose")]
            () => LevelFilter::Debug,
            #[cfg(not(feature = "verbose"))]
            () => LevelFilter::Warn,
        })
        .parse_default_env()
        .format(move |buf, record| {
            writeln!(
                buf,
                "{:.2?} {} - {}",
                start.elapsed(),
                record.level(),
                record.args()
            )
        })
        .init();
}

/// Flow value, then the min-cut edges 1 based when asked for.
fn write_flow(out: &mut impl Write, result: &MaxFlow, min_cut: bool) -> io::Result<()> {
    writeln!(out, "{}", result.value)?;
    if min_cut {
        for (u, v) in result.min_cut() {
            writeln!(out, "{} {}", u + 1, v + 1)?;
        }
    }
    Ok(())
}

/// `row column` per row, 1 based, then the total cost.
fn write_assignment(out: &mut impl Write, assignment: &Assignment) -> io::Result<()> {
    for (row, column) in assignment.columns.iter().enumerate() {
        writeln!(out, "{} {}", row + 1, column + 1)?;
    }
    writeln!(out, "{}", assignment.cost)
}

/// Matching size, then the matched `left right` pairs, 1 based.
fn write_matching(out: &mut impl Write, matching: &Matching) -> io::Result<()> {
    writeln!(out, "{}", matching.len())?;
    for (l, r) in matching {
        writeln!(out, "{} {}", l + 1, r + 1)?;
    }
    Ok(())
}

fn run(args: Args) -> Result<(), GraphError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args {
        Args::Flow {
            input,
            algorithm,
            min_cut,
        } => {
            let instance = FlowInstance::read(File::open(&input)?)?;
            log::info!(
                "Instance with {} vertices and {} arcs",
                instance.network.vertex_count(),
                instance.network.edge_count()
            );

            let result = max_flow(&instance.network, instance.source, instance.sink, algorithm)?;
            write_flow(&mut out, &result, min_cut)?;
        }
        Args::Assign { input } => {
            let costs = read_cost_matrix(File::open(&input)?)?;
            log::info!("Cost matrix {}x{}", costs.rows(), costs.cols());

            let assignment = costs.perfect_assignment()?;
            write_assignment(&mut out, &assignment)?;
        }
        Args::Match { input, algorithm } => {
            let graph = read_bipartite(File::open(&input)?)?;
            log::info!(
                "Bipartite graph with {} + {} vertices",
                graph.left_count(),
                graph.right_count()
            );

            let matching = graph.maximum_matching_with(algorithm)?;
            write_matching(&mut out, &matching)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logger();

    match run(Args::from_args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{}", error);
            eprintln!("error: {}", error);
            ExitCode::FAILURE
        }
    }
}
