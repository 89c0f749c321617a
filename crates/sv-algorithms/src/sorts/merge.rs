//! Merge sort

use sv_core::{OperationTrace, TraceRecorder, Value};

/// Top-down merge sort
///
/// Each merge decision records a `Compare` whose two indices are both the
/// destination slot, followed by the `Overwrite` of that slot. Consumers
/// depend on this exact shape, so the compared source positions are not
/// recorded.
pub fn merge_sort(input: &[Value]) -> OperationTrace {
    let mut arr = input.to_vec();
    let mut trace = TraceRecorder::new();

    if !arr.is_empty() {
        let last = arr.len() - 1;
        sort_range(&mut arr, &mut trace, 0, last);
    }

    trace.sorted_all(arr.len());
    trace.finish()
}

fn sort_range(arr: &mut [Value], trace: &mut TraceRecorder, left: usize, right: usize) {
    if left < right {
        let mid = (left + right) / 2;
        sort_range(arr, trace, left, mid);
        sort_range(arr, trace, mid + 1, right);
        merge(arr, trace, left, mid, right);
    }
}

fn merge(arr: &mut [Value], trace: &mut TraceRecorder, left: usize, mid: usize, right: usize) {
    let left_half = arr[left..=mid].to_vec();
    let right_half = arr[mid + 1..=right].to_vec();

    let (mut i, mut j, mut k) = (0, 0, left);

    while i < left_half.len() && j < right_half.len() {
        trace.compare(k, k);
        // Ties take from the left half, which keeps the sort stable
        let value = if left_half[i] <= right_half[j] {
            i += 1;
            left_half[i - 1]
        } else {
            j += 1;
            right_half[j - 1]
        };
        arr[k] = value;
        trace.overwrite(k, value);
        k += 1;
    }

    for &value in left_half[i..].iter().chain(&right_half[j..]) {
        arr[k] = value;
        trace.overwrite(k, value);
        k += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorts::test_support::assert_sorts;
    use sv_core::{Operation, OperationKind};

    #[test]
    fn test_compare_targets_destination() {
        let trace = merge_sort(&[2, 1]);
        assert_eq!(
            trace.operations(),
            &[
                Operation::compare(0, 0),
                Operation::overwrite(0, 1),
                Operation::overwrite(1, 2),
                Operation::sorted(0),
                Operation::sorted(1),
            ]
        );
    }

    #[test]
    fn test_every_compare_is_self_pair() {
        let trace = merge_sort(&[8, 3, 5, 1, 9, 2, 7]);
        assert!(trace
            .iter()
            .filter(|op| op.kind == OperationKind::Compare)
            .all(|op| op.indices.as_slice()[0] == op.indices.as_slice()[1]));
    }

    #[test]
    fn test_sorts() {
        for input in [vec![], vec![3], vec![5, 1, 4, 1, 5, 9, 2, 6], vec![9, 8, 7, 6, 5]] {
            assert_sorts(&merge_sort(&input), &input);
        }
    }
}
