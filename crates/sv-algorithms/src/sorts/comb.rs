//! Comb sort

use sv_core::{OperationTrace, TraceRecorder, Value};

const SHRINK: f64 = 1.3;

/// Bubble sort over a gap that shrinks by 1.3 each pass
///
/// Sortedness cannot be certified before the final gap-1 pass, so every index
/// is marked only at the end.
pub fn comb_sort(input: &[Value]) -> OperationTrace {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut trace = TraceRecorder::new();

    let mut gap = n;
    let mut sorted = false;
    while !sorted {
        gap = (gap as f64 / SHRINK).floor() as usize;
        if gap <= 1 {
            gap = 1;
            sorted = true;
        }

        for i in 0..n.saturating_sub(gap) {
            trace.compare(i, i + gap);
            if arr[i] > arr[i + gap] {
                trace.swap(i, i + gap);
                arr.swap(i, i + gap);
                sorted = false;
            }
        }
    }

    trace.sorted_all(n);
    trace.finish()
}
