//! Operation traces and the recorder used to build them

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Operation, OperationKind};
use crate::error::TraceError;
use crate::projection;
use crate::Value;

/// Immutable, ordered record of one algorithm run
///
/// Cloning is cheap: the operations are shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationTrace {
    operations: Arc<[Operation]>,
}

impl OperationTrace {
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Operation> {
        self.operations.get(index)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    /// Number of operations of the given kind
    pub fn count(&self, kind: OperationKind) -> usize {
        self.operations.iter().filter(|op| op.kind == kind).count()
    }

    /// Check every operation against an array of `len` elements
    pub fn validate(&self, len: usize) -> Result<(), TraceError> {
        self.operations.iter().try_for_each(|op| op.validate(len))
    }

    /// Replay the whole trace against a fresh copy of `original`
    pub fn replay(&self, original: &[Value]) -> Vec<Value> {
        let mut working = original.to_vec();
        for op in self.operations.iter() {
            projection::apply_to_array(op, &mut working);
        }
        working
    }
}

impl Default for OperationTrace {
    fn default() -> Self {
        Self::from(Vec::new())
    }
}

impl From<Vec<Operation>> for OperationTrace {
    fn from(operations: Vec<Operation>) -> Self {
        Self {
            operations: operations.into(),
        }
    }
}

impl<'a> IntoIterator for &'a OperationTrace {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Append-only builder that instrumented algorithms write into
#[derive(Debug, Default)]
pub struct TraceRecorder {
    operations: Vec<Operation>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    pub fn compare(&mut self, first: usize, second: usize) {
        self.record(Operation::compare(first, second));
    }

    pub fn swap(&mut self, first: usize, second: usize) {
        self.record(Operation::swap(first, second));
    }

    pub fn overwrite(&mut self, index: usize, value: Value) {
        self.record(Operation::overwrite(index, value));
    }

    pub fn pivot(&mut self, index: usize) {
        self.record(Operation::pivot(index));
    }

    pub fn current(&mut self, index: usize) {
        self.record(Operation::current(index));
    }

    pub fn placed(&mut self, index: usize) {
        self.record(Operation::placed(index));
    }

    pub fn sorted(&mut self, index: usize) {
        self.record(Operation::sorted(index));
    }

    /// Mark `0..len` sorted in ascending index order
    pub fn sorted_all(&mut self, len: usize) {
        for index in 0..len {
            self.sorted(index);
        }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn finish(self) -> OperationTrace {
        OperationTrace::from(self.operations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OperationTrace {
        let mut recorder = TraceRecorder::new();
        recorder.compare(0, 1);
        recorder.swap(0, 1);
        recorder.overwrite(2, 1);
        recorder.sorted_all(3);
        recorder.finish()
    }

    #[test]
    fn test_recorder_order() {
        let trace = sample();
        assert_eq!(trace.len(), 6);
        assert_eq!(trace.get(0), Some(&Operation::compare(0, 1)));
        assert_eq!(trace.get(2), Some(&Operation::overwrite(2, 1)));
        assert_eq!(trace.count(OperationKind::Sorted), 3);
    }

    #[test]
    fn test_replay_is_idempotent() {
        let trace = sample();
        let original = [9, 4, 7];

        let first = trace.replay(&original);
        let second = trace.replay(&original);

        assert_eq!(first, vec![4, 9, 1]);
        assert_eq!(first, second);
        assert_eq!(original, [9, 4, 7]);
    }

    #[test]
    fn test_validate_reports_first_bad_index() {
        let trace = sample();
        assert!(trace.validate(3).is_ok());
        assert!(matches!(
            trace.validate(2),
            Err(TraceError::IndexOutOfBounds { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_serializes_as_list() {
        let trace = OperationTrace::from(vec![Operation::pivot(1)]);
        let json = serde_json::to_string(&trace).unwrap();
        assert_eq!(json, r#"[{"kind":"pivot","indices":[1]}]"#);
    }
}
