//! Instrumented array operations

use serde::{Deserialize, Serialize};

mod trace;

pub use trace::{OperationTrace, TraceRecorder};

use crate::error::TraceError;
use crate::Value;

/// Kind of an atomic instrumented event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Two positions are about to be compared
    Compare,
    /// Two positions exchange their values
    Swap,
    /// A value is written at a single position
    Overwrite,
    /// The position holds the pivot of the current partition
    Pivot,
    /// The position is the element being processed
    Current,
    /// An element came to rest at this position for now
    Placed,
    /// The position holds its final value
    Sorted,
}

impl OperationKind {
    /// Whether replaying this kind changes the working array
    pub fn is_mutation(self) -> bool {
        matches!(self, OperationKind::Swap | OperationKind::Overwrite)
    }
}

/// One or two target positions of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub struct Indices {
    slots: [usize; 2],
    len: u8,
}

impl Indices {
    pub fn one(index: usize) -> Self {
        Self { slots: [index, index], len: 1 }
    }

    pub fn two(first: usize, second: usize) -> Self {
        Self { slots: [first, second], len: 2 }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.slots[..self.len as usize]
    }

    pub fn first(&self) -> usize {
        self.slots[0]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }
}

impl From<Indices> for Vec<usize> {
    fn from(indices: Indices) -> Self {
        indices.as_slice().to_vec()
    }
}

impl TryFrom<Vec<usize>> for Indices {
    type Error = TraceError;

    fn try_from(value: Vec<usize>) -> Result<Self, Self::Error> {
        match value.as_slice() {
            [index] => Ok(Indices::one(*index)),
            [first, second] => Ok(Indices::two(*first, *second)),
            other => Err(TraceError::IndexCount(other.len())),
        }
    }
}

/// One atomic instrumented event in an operation trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OperationKind,
    pub indices: Indices,
    /// Written value, present only for `Overwrite`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Operation {
    pub fn compare(first: usize, second: usize) -> Self {
        Self::pair(OperationKind::Compare, first, second)
    }

    pub fn swap(first: usize, second: usize) -> Self {
        Self::pair(OperationKind::Swap, first, second)
    }

    pub fn overwrite(index: usize, value: Value) -> Self {
        Self {
            kind: OperationKind::Overwrite,
            indices: Indices::one(index),
            value: Some(value),
        }
    }

    pub fn pivot(index: usize) -> Self {
        Self::single(OperationKind::Pivot, index)
    }

    pub fn current(index: usize) -> Self {
        Self::single(OperationKind::Current, index)
    }

    pub fn placed(index: usize) -> Self {
        Self::single(OperationKind::Placed, index)
    }

    pub fn sorted(index: usize) -> Self {
        Self::single(OperationKind::Sorted, index)
    }

    fn single(kind: OperationKind, index: usize) -> Self {
        Self { kind, indices: Indices::one(index), value: None }
    }

    fn pair(kind: OperationKind, first: usize, second: usize) -> Self {
        Self { kind, indices: Indices::two(first, second), value: None }
    }

    /// Check that every index lies in `[0, len)` and the operation is well formed
    pub fn validate(&self, len: usize) -> Result<(), TraceError> {
        if let Some(&index) = self.indices.as_slice().iter().find(|&&i| i >= len) {
            return Err(TraceError::IndexOutOfBounds { index, len });
        }

        match (self.kind, self.value) {
            (OperationKind::Overwrite, None) => Err(TraceError::MissingValue),
            (OperationKind::Overwrite, Some(_)) if self.indices.len() != 1 => {
                Err(TraceError::IndexCount(self.indices.len()))
            }
            (OperationKind::Swap, _) if self.indices.len() != 2 => {
                Err(TraceError::IndexCount(self.indices.len()))
            }
            (kind, Some(_)) if kind != OperationKind::Overwrite => Err(TraceError::UnexpectedValue(kind)),
            _ => Ok(()),
        }
    }
}
