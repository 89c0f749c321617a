//! Quick sort with Lomuto partitioning

use sv_core::{OperationTrace, TraceRecorder, Value};

/// Quick sort using the last element of each range as pivot
///
/// A pivot is marked sorted as soon as its partition finishes. Positions that
/// never become a pivot (single-element ranges) are marked at the end, so each
/// index is still marked exactly once.
pub fn quick_sort(input: &[Value]) -> OperationTrace {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut trace = TraceRecorder::new();
    let mut fixed = vec![false; n];

    if n > 0 {
        sort_range(&mut arr, &mut trace, &mut fixed, 0, n - 1);
    }

    for (index, _) in fixed.iter().enumerate().filter(|(_, done)| !**done) {
        trace.sorted(index);
    }
    trace.finish()
}

fn sort_range(arr: &mut [Value], trace: &mut TraceRecorder, fixed: &mut [bool], low: usize, high: usize) {
    if low >= high {
        return;
    }

    let pi = partition(arr, trace, low, high);
    trace.sorted(pi);
    fixed[pi] = true;

    if pi > low {
        sort_range(arr, trace, fixed, low, pi - 1);
    }
    sort_range(arr, trace, fixed, pi + 1, high);
}

fn partition(arr: &mut [Value], trace: &mut TraceRecorder, low: usize, high: usize) -> usize {
    let pivot = arr[high];
    trace.pivot(high);

    // Next slot for a value smaller than the pivot
    let mut store = low;
    for j in low..high {
        trace.compare(j, high);
        if arr[j] < pivot {
            if store != j {
                trace.swap(store, j);
                arr.swap(store, j);
            }
            store += 1;
        }
    }

    trace.swap(store, high);
    arr.swap(store, high);
    store
}
