//! Bubble sort

use sv_core::{OperationTrace, TraceRecorder, Value};

/// Adjacent compare-and-swap passes; each pass fixes the largest remaining value
pub fn bubble_sort(input: &[Value]) -> OperationTrace {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut trace = TraceRecorder::new();
    if n == 0 {
        return trace.finish();
    }

    for i in 0..n - 1 {
        for j in 0..n - i - 1 {
            trace.compare(j, j + 1);
            if arr[j] > arr[j + 1] {
                trace.swap(j, j + 1);
                arr.swap(j, j + 1);
            }
        }
        trace.sorted(n - i - 1);
    }
    trace.sorted(0);

    trace.finish()
}
