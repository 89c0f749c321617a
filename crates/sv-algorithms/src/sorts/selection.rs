//! Selection sort

use sv_core::{OperationTrace, TraceRecorder, Value};

/// Select the minimum of the unsorted suffix and swap it into place
pub fn selection_sort(input: &[Value]) -> OperationTrace {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut trace = TraceRecorder::new();
    if n == 0 {
        return trace.finish();
    }

    for i in 0..n - 1 {
        let mut min_idx = i;
        trace.current(i);

        for j in i + 1..n {
            trace.compare(min_idx, j);
            if arr[j] < arr[min_idx] {
                min_idx = j;
            }
        }

        if min_idx != i {
            trace.swap(i, min_idx);
            arr.swap(i, min_idx);
        }
        trace.sorted(i);
    }
    trace.sorted(n - 1);

    trace.finish()
}
