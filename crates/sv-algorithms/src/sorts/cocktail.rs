//! Cocktail shaker sort

use sv_core::{OperationTrace, TraceRecorder, Value};

/// Bidirectional bubble sort
///
/// Forward passes shrink the window's end, backward passes its start. Stops
/// as soon as a forward pass makes no swap.
pub fn cocktail_sort(input: &[Value]) -> OperationTrace {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut trace = TraceRecorder::new();
    if n == 0 {
        return trace.finish();
    }

    let (mut start, mut end) = (0, n - 1);
    let mut swapped = true;
    while swapped {
        swapped = false;
        for i in start..end {
            trace.compare(i, i + 1);
            if arr[i] > arr[i + 1] {
                trace.swap(i, i + 1);
                arr.swap(i, i + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }

        swapped = false;
        end -= 1;
        for i in (start + 1..=end).rev() {
            trace.compare(i - 1, i);
            if arr[i - 1] > arr[i] {
                trace.swap(i - 1, i);
                arr.swap(i - 1, i);
                swapped = true;
            }
        }
        start += 1;
    }

    trace.sorted_all(n);
    trace.finish()
}
