//! Counting sort

use sv_core::{OperationTrace, TraceRecorder, Value};

use crate::SortError;

/// Widest value range the frequency table may span
pub const MAX_COUNTING_RANGE: usize = 1 << 20;

/// Tabulate value frequencies over `min..=max`, then rewrite the array in order
pub fn counting_sort(input: &[Value]) -> Result<OperationTrace, SortError> {
    let mut arr = input.to_vec();
    let mut trace = TraceRecorder::new();
    let (Some(&min), Some(&max)) = (arr.iter().min(), arr.iter().max()) else {
        return Ok(trace.finish());
    };

    let range = frequency_range(min, max);
    if range > MAX_COUNTING_RANGE {
        return Err(SortError::RangeTooLarge { min, max });
    }

    let mut count = vec![0usize; range];
    for (i, &value) in arr.iter().enumerate() {
        trace.current(i);
        count[(value - min) as usize] += 1;
    }

    let mut idx = 0;
    for (offset, &frequency) in count.iter().enumerate() {
        let value = min + offset as Value;
        for _ in 0..frequency {
            trace.overwrite(idx, value);
            arr[idx] = value;
            idx += 1;
        }
    }

    trace.sorted_all(arr.len());
    Ok(trace.finish())
}

/// Number of slots in the frequency table, `max - min + 1`
pub fn frequency_range(min: Value, max: Value) -> usize {
    (max - min) as usize + 1
}
