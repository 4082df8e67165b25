//! The immutable step log and the cursor contract used to replay it.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::step::Step;

/// Position in a step log.
///
/// `-1` is the pristine state before any step; `len - 1` is fully executed.
/// The step at index `k` was applied to reach cursor `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(isize);

impl Cursor {
    /// Before the first step.
    pub const PRISTINE: Self = Self(-1);

    /// Create a cursor at a raw position.
    pub const fn new(position: isize) -> Self {
        Self(position)
    }

    /// Raw position.
    pub const fn position(&self) -> isize {
        self.0
    }

    /// Index of the last applied step, `None` when pristine.
    pub fn index(&self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    /// Check whether no step has been applied.
    pub fn is_pristine(&self) -> bool {
        self.0 < 0
    }

    /// The cursor one step further.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// The cursor one step back.
    pub fn prev(&self) -> Self {
        Self(self.0 - 1)
    }

    /// The cursor after every step of a log of `len` steps.
    pub fn end(len: usize) -> Self {
        Self(len as isize - 1)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::PRISTINE
    }
}

/// The ordered steps of one algorithm run. Immutable once produced.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepLog {
    steps: Arc<[Step]>,
}

impl StepLog {
    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// A single step.
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// All steps in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// All steps as a slice.
    pub fn as_slice(&self) -> &[Step] {
        &self.steps
    }

    /// Check whether `Next` is allowed at `cursor`.
    pub fn can_advance(&self, cursor: Cursor) -> bool {
        cursor < Cursor::end(self.len())
    }

    /// Check whether `Previous` is allowed at `cursor`.
    pub fn can_rewind(&self, cursor: Cursor) -> bool {
        cursor > Cursor::PRISTINE
    }

    /// The step `Next` applies forward: `steps[cursor + 1]`.
    pub fn forward_step(&self, cursor: Cursor) -> Option<&Step> {
        if !self.can_advance(cursor) {
            return None;
        }
        cursor.next().index().and_then(|i| self.steps.get(i))
    }

    /// The step `Previous` applies backward: `steps[cursor]`.
    pub fn backward_step(&self, cursor: Cursor) -> Option<&Step> {
        if !self.can_rewind(cursor) {
            return None;
        }
        cursor.index().and_then(|i| self.steps.get(i))
    }

    /// Clamp a requested position into `[-1, len - 1]`.
    pub fn clamp(&self, cursor: Cursor) -> Cursor {
        cursor.clamp(Cursor::PRISTINE, Cursor::end(self.len()))
    }
}

impl From<Vec<Step>> for StepLog {
    fn from(steps: Vec<Step>) -> Self {
        Self { steps: steps.into() }
    }
}

impl<'a> IntoIterator for &'a StepLog {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl Serialize for StepLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.steps.iter())
    }
}

impl<'de> Deserialize<'de> for StepLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Step>::deserialize(deserializer).map(Self::from)
    }
}
