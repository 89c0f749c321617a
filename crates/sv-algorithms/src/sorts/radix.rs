//! LSD radix sort

use sv_core::{OperationTrace, TraceRecorder, Value};

/// Stable counting pass per decimal digit, least significant first
///
/// Each pass records `Current` while tallying digits and `Overwrite` while
/// copying the pass output back.
pub fn radix_sort(input: &[Value]) -> OperationTrace {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut trace = TraceRecorder::new();
    let Some(&max) = arr.iter().max() else {
        return trace.finish();
    };

    // u64 so the place value cannot overflow past the largest u32
    let mut exp: u64 = 1;
    while u64::from(max) / exp > 0 {
        let digit = |value: Value| ((u64::from(value) / exp) % 10) as usize;
        let mut count = [0usize; 10];

        for (i, &value) in arr.iter().enumerate() {
            count[digit(value)] += 1;
            trace.current(i);
        }
        for d in 1..10 {
            count[d] += count[d - 1];
        }

        let mut output = vec![0; n];
        for &value in arr.iter().rev() {
            let d = digit(value);
            count[d] -= 1;
            output[count[d]] = value;
        }

        for (i, &value) in output.iter().enumerate() {
            trace.overwrite(i, value);
            arr[i] = value;
        }
        exp *= 10;
    }

    trace.sorted_all(n);
    trace.finish()
}
