//! Bellman-Ford Step Visualizer
//!
//! Page forward and backward through a recorded Bellman-Ford run.
//!
//! # Architecture
//!
//! - **Input**: Parses `src, dest, weight` edge lists and validates the source
//! - **Session**: Owns the cursor and keeps the three projections in lock-step
//! - **REST API**: Load a graph, start a run, step, seek, query paths
//! - **WebSocket**: The same controls as JSON commands
//!
//! # Usage
//!
//! ```ignore
//! let graph = input::load_graph("a, b, 4\nb, c, -1", "a")?;
//! let mut session = Session::new(graph);
//! session.start()?;
//!
//! let server = VisServer::new(session);
//! server.serve("127.0.0.1:3000".parse()?).await?;
//! ```

mod config;
mod error;
pub mod input;
mod server;
mod session;

pub use config::VisConfig;
pub use error::{Error, Result};
pub use server::VisServer;
pub use session::{PlaybackState, PlaybackStatus, Session, SessionSnapshot};
