//! Insertion sort

use sv_core::{OperationTrace, TraceRecorder, Value};

/// Shifts each key left into the sorted prefix
///
/// Every shift is recorded as a `Compare` followed by a `Swap` of the two
/// neighbours. The private copy only moves the larger value up, but replaying
/// the swaps carries the key along, so the display ends in the same state.
pub fn insertion_sort(input: &[Value]) -> OperationTrace {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut trace = TraceRecorder::new();

    for i in 1..n {
        let key = arr[i];
        let mut j = i;
        trace.current(i);

        while j > 0 && arr[j - 1] > key {
            trace.compare(j - 1, j);
            trace.swap(j - 1, j);
            arr[j] = arr[j - 1];
            j -= 1;
        }
        arr[j] = key;
        trace.placed(j);
    }

    trace.sorted_all(n);
    trace.finish()
}
