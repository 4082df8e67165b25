//! Bellman-Ford Step Visualizer Server
//!
//! Load a graph, record a run and serve the step-through controls.

use bfviz_vis::{Session, VisConfig, VisServer};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| VisConfig::DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Environment first, then positional args: [graph-file] [source]
    let config = VisConfig::from_env()?.with_args(env::args().skip(1));
    let graph = config.load_graph()?;

    println!("Bellman-Ford Step Visualizer");
    println!("============================");
    println!();
    println!(
        "Graph: {} vertices, {} edges, source {}",
        graph.vertex_count(),
        graph.distinct_edge_count(),
        config.source
    );

    let mut session = Session::new(graph);
    session.start()?;

    if let Some(run) = session.result() {
        println!("Steps: {}", run.steps.len());
        println!();
        println!("{}", run.distances);
    }

    println!("Starting visualization server on http://{}", config.addr);
    println!();

    VisServer::new(session).serve(config.addr).await?;

    Ok(())
}
