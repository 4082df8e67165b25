//! Playback session: owns the cursor and the three projections.

use bfviz_engine::{run, BellmanFordRun, Cursor, Step};
use bfviz_graph::{Graph, NodeName};
use bfviz_replay::{DistanceTable, ParentTable, Projection, VisGraph};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// No run yet
    Idle,
    /// Run recorded, no step applied
    Pristine,
    /// Somewhere in the middle
    Stepping,
    /// Every step applied
    Finished,
}

/// A graph being stepped through.
///
/// Next/Previous/Seek fan out to all three projections, so they always show
/// the same point of the run.
#[derive(Debug, Clone)]
pub struct Session {
    graph: Graph,
    run: Option<BellmanFordRun>,
    cursor: Cursor,
    visual: VisGraph,
    distances: DistanceTable,
    parent: ParentTable,
}

impl Session {
    /// Create a session that has not been started.
    pub fn new(graph: Graph) -> Self {
        Self {
            visual: VisGraph::reset(&graph),
            distances: DistanceTable::reset(&graph),
            parent: ParentTable::reset(&graph),
            graph,
            run: None,
            cursor: Cursor::PRISTINE,
        }
    }

    /// The graph being visualized.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The recorded run, once started.
    pub fn result(&self) -> Option<&BellmanFordRun> {
        self.run.as_ref()
    }

    /// Current cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Check whether a run has been recorded.
    pub fn is_started(&self) -> bool {
        self.run.is_some()
    }

    pub fn visual(&self) -> &VisGraph {
        &self.visual
    }

    pub fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    pub fn parent(&self) -> &ParentTable {
        &self.parent
    }

    /// Record a fresh run and rewind every projection to the pristine state.
    pub fn start(&mut self) -> Result<()> {
        let source = self
            .graph
            .source()
            .cloned()
            .ok_or(Error::NoSource)?;

        let result = run(&self.graph, &source);
        debug!(%source, steps = result.steps.len(), "session started");

        self.visual = VisGraph::reset(&self.graph);
        self.distances = DistanceTable::reset(&self.graph);
        self.parent = ParentTable::reset(&self.graph);
        self.cursor = Cursor::PRISTINE;
        self.run = Some(result);
        Ok(())
    }

    /// Apply `steps[cursor + 1]`. Returns `false` at the end.
    pub fn next(&mut self) -> Result<bool> {
        let run = self.run.as_ref().ok_or(Error::NotStarted)?;
        let Some(step) = run.steps.forward_step(self.cursor) else {
            return Ok(false);
        };

        self.visual = self.visual.apply_forward(step);
        self.distances = self.distances.apply_forward(step);
        self.parent = self.parent.apply_forward(step);
        self.cursor = self.cursor.next();
        debug!(cursor = self.cursor.position(), "step forward");
        Ok(true)
    }

    /// Undo `steps[cursor]`. Returns `false` when pristine.
    pub fn previous(&mut self) -> Result<bool> {
        let run = self.run.as_ref().ok_or(Error::NotStarted)?;
        let Some(step) = run.steps.backward_step(self.cursor) else {
            return Ok(false);
        };

        self.visual = self.visual.apply_backward(step);
        self.distances = self.distances.apply_backward(step);
        self.parent = self.parent.apply_backward(step);
        self.cursor = self.cursor.prev();
        debug!(cursor = self.cursor.position(), "step backward");
        Ok(true)
    }

    /// Page to `target`, clamped to the log.
    pub fn seek(&mut self, target: Cursor) -> Result<Cursor> {
        let run = self.run.as_ref().ok_or(Error::NotStarted)?;
        let target = run.steps.clamp(target);

        while self.cursor < target && self.next()? {}
        while self.cursor > target && self.previous()? {}

        Ok(self.cursor)
    }

    /// The step that produced the current state.
    pub fn current_step(&self) -> Option<&Step> {
        let run = self.run.as_ref()?;
        run.steps.get(self.cursor.index()?)
    }

    /// Shortest path to `node` at the end of the run.
    pub fn path_to(&self, node: &NodeName) -> Result<Option<Vec<NodeName>>> {
        let run = self.run.as_ref().ok_or(Error::NotStarted)?;
        Ok(run.path_to(node))
    }

    pub fn state(&self) -> PlaybackState {
        let Some(run) = &self.run else {
            return PlaybackState::Idle;
        };
        if self.cursor.is_pristine() {
            PlaybackState::Pristine
        } else if run.steps.can_advance(self.cursor) {
            PlaybackState::Stepping
        } else {
            PlaybackState::Finished
        }
    }

    /// Fraction of steps applied, `0.0` to `1.0`.
    pub fn progress(&self) -> f64 {
        match &self.run {
            Some(run) if !run.steps.is_empty() => {
                (self.cursor.position() + 1) as f64 / run.steps.len() as f64
            }
            _ => 0.0,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from(self)
    }

    /// Everything a client needs to draw the current point.
    pub fn snapshot(&self) -> SessionSnapshot {
        let step = self.current_step().cloned();
        SessionSnapshot {
            status: self.status(),
            visual: self.visual.clone(),
            distances: self.distances.clone(),
            parent: self.parent.clone(),
            caption: step.as_ref().map(Step::describe),
            step,
        }
    }
}

/// Playback status for sending to frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub cursor: Cursor,
    pub total_steps: usize,
    pub state: PlaybackState,
    pub progress: f64,
    pub can_advance: bool,
    pub can_rewind: bool,
}

impl From<&Session> for PlaybackStatus {
    fn from(session: &Session) -> Self {
        let (total_steps, can_advance, can_rewind) = match &session.run {
            Some(run) => (
                run.steps.len(),
                run.steps.can_advance(session.cursor),
                run.steps.can_rewind(session.cursor),
            ),
            None => (0, false, false),
        };
        Self {
            cursor: session.cursor,
            total_steps,
            state: session.state(),
            progress: session.progress(),
            can_advance,
            can_rewind,
        }
    }
}

/// The three projections at the cursor, plus the step that led there.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub status: PlaybackStatus,
    pub visual: VisGraph,
    pub distances: DistanceTable,
    pub parent: ParentTable,
    pub step: Option<Step>,
    pub caption: Option<String>,
}
