//! Shell sort

use sv_core::{OperationTrace, TraceRecorder, Value};

/// Gapped insertion sort over the gaps `n/2, n/4, ..., 1`
///
/// Shifts are recorded the same way as insertion sort: a `Compare` and a
/// `Swap` per step, then `Placed` where the element comes to rest.
pub fn shell_sort(input: &[Value]) -> OperationTrace {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut trace = TraceRecorder::new();

    let mut gap = n / 2;
    while gap > 0 {
        for i in gap..n {
            let temp = arr[i];
            let mut j = i;
            trace.current(i);

            while j >= gap && arr[j - gap] > temp {
                trace.compare(j, j - gap);
                trace.swap(j, j - gap);
                arr[j] = arr[j - gap];
                j -= gap;
            }
            arr[j] = temp;
            trace.placed(j);
        }
        gap /= 2;
    }

    trace.sorted_all(n);
    trace.finish()
}
