//! Bucket sort

use sv_core::{OperationTrace, TraceRecorder, Value};

/// Number of buckets for `n` elements, `max(1, floor(sqrt(n)))`
pub fn bucket_count(n: usize) -> usize {
    ((n as f64).sqrt().floor() as usize).max(1)
}

/// Distribute into equal-width buckets, sort each, then flatten
///
/// Distribution records `Current` per element. Sorting inside a bucket is not
/// recorded; flattening records one `Overwrite` per element in bucket order.
pub fn bucket_sort(input: &[Value]) -> OperationTrace {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut trace = TraceRecorder::new();
    let (Some(&min), Some(&max)) = (arr.iter().min(), arr.iter().max()) else {
        return trace.finish();
    };

    let buckets_len = bucket_count(n);
    let width = (f64::from(max) - f64::from(min) + 1.0) / buckets_len as f64;
    let mut buckets: Vec<Vec<Value>> = vec![Vec::new(); buckets_len];

    for (i, &value) in arr.iter().enumerate() {
        let slot = ((f64::from(value - min) / width).floor() as usize).min(buckets_len - 1);
        trace.current(i);
        buckets[slot].push(value);
    }

    let mut idx = 0;
    for bucket in &mut buckets {
        insertion_sort_in_place(bucket);
        for &value in bucket.iter() {
            trace.overwrite(idx, value);
            arr[idx] = value;
            idx += 1;
        }
    }

    trace.sorted_all(n);
    trace.finish()
}

fn insertion_sort_in_place(bucket: &mut [Value]) {
    for i in 1..bucket.len() {
        let key = bucket[i];
        let mut j = i;
        while j > 0 && bucket[j - 1] > key {
            bucket[j] = bucket[j - 1];
            j -= 1;
        }
        bucket[j] = key;
    }
}
