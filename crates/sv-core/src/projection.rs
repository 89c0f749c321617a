//! State projection: from trace position to displayed array and annotations
//!
//! The displayed array is driven purely by replaying recorded operations, so it
//! never depends on the private copy a generator sorted internally.

use serde::{Deserialize, Serialize};

use crate::operation::{Operation, OperationKind};
use crate::Value;

/// Visual flags for a single position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub comparing: bool,
    pub swapping: bool,
    pub pivot: bool,
    pub current: bool,
    /// Monotonic within a run
    pub sorted: bool,
}

impl Annotation {
    /// Keep only the persistent `sorted` flag
    pub fn persistent(self) -> Self {
        Self {
            sorted: self.sorted,
            ..Self::default()
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// Per-index annotations for the whole working array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationMap {
    entries: Vec<Annotation>,
}

impl AnnotationMap {
    pub fn new(len: usize) -> Self {
        Self {
            entries: vec![Annotation::default(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Annotation> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.entries.iter()
    }

    pub fn sorted_count(&self) -> usize {
        self.entries.iter().filter(|a| a.sorted).count()
    }

    pub fn all_sorted(&self) -> bool {
        self.entries.iter().all(|a| a.sorted)
    }

    /// Drop every flag, including `sorted`
    pub fn clear(&mut self) {
        self.entries.fill(Annotation::default());
    }
}

/// Derive the annotation map that follows `prior` once `op` is applied
pub fn project(op: &Operation, prior: &AnnotationMap) -> AnnotationMap {
    let mut entries: Vec<Annotation> = prior.entries.iter().map(|a| a.persistent()).collect();

    for &index in op.indices.as_slice() {
        // Out-of-range indices are ignored rather than growing the map
        let Some(entry) = entries.get_mut(index) else {
            continue;
        };
        match op.kind {
            OperationKind::Compare => entry.comparing = true,
            OperationKind::Swap => entry.swapping = true,
            OperationKind::Pivot => entry.pivot = true,
            OperationKind::Current => entry.current = true,
            OperationKind::Sorted => entry.sorted = true,
            OperationKind::Overwrite | OperationKind::Placed => {}
        }
    }

    AnnotationMap { entries }
}

/// Mutate the displayed array for a single operation
pub fn apply_to_array(op: &Operation, working: &mut [Value]) {
    match (op.kind, op.indices.as_slice(), op.value) {
        (OperationKind::Swap, &[first, second], _) if first < working.len() && second < working.len() => {
            working.swap(first, second);
        }
        (OperationKind::Overwrite, &[index, ..], Some(value)) if index < working.len() => {
            working[index] = value;
        }
        _ => {}
    }
}

/// Apply `op` to the working array and return the next annotation map
pub fn apply(op: &Operation, prior: &AnnotationMap, working: &mut [Value]) -> AnnotationMap {
    if op.kind.is_mutation() {
        apply_to_array(op, working);
    }
    project(op, prior)
}
