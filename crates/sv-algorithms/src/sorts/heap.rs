//! Heap sort

use sv_core::{OperationTrace, TraceRecorder, Value};

/// Build a max-heap, then repeatedly move the root behind the heap
pub fn heap_sort(input: &[Value]) -> OperationTrace {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut trace = TraceRecorder::new();
    if n == 0 {
        return trace.finish();
    }

    for root in (0..n / 2).rev() {
        sift_down(&mut arr, &mut trace, n, root);
    }

    for end in (1..n).rev() {
        trace.swap(0, end);
        arr.swap(0, end);
        trace.sorted(end);
        sift_down(&mut arr, &mut trace, end, 0);
    }
    trace.sorted(0);

    trace.finish()
}

fn sift_down(arr: &mut [Value], trace: &mut TraceRecorder, size: usize, root: usize) {
    let mut largest = root;
    let left = 2 * root + 1;
    let right = 2 * root + 2;

    if left < size {
        trace.compare(left, largest);
        if arr[left] > arr[largest] {
            largest = left;
        }
    }

    if right < size {
        trace.compare(right, largest);
        if arr[right] > arr[largest] {
            largest = right;
        }
    }

    if largest != root {
        trace.swap(root, largest);
        arr.swap(root, largest);
        sift_down(arr, trace, size, largest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorts::test_support::assert_sorts;
    use sv_core::{Operation, OperationKind};

    #[test]
    fn test_extraction_marks_tail() {
        let trace = heap_sort(&[1, 3, 2]);
        let marks: Vec<usize> = trace
            .iter()
            .filter(|op| op.kind == OperationKind::Sorted)
            .map(|op| op.indices.first())
            .collect();
        assert_eq!(marks, vec![2, 1, 0]);
    }

    #[test]
    fn test_build_heap_compares_children() {
        let trace = heap_sort(&[1, 3, 2]);
        assert_eq!(
            trace.operations()[..3],
            [Operation::compare(1, 0), Operation::compare(2, 1), Operation::swap(0, 1)]
        );
    }

    #[test]
    fn test_sorts() {
        for input in [vec![], vec![5], vec![2, 1], vec![4, 10, 3, 5, 1], vec![7, 7, 3, 3, 9, 0]] {
            assert_sorts(&heap_sort(&input), &input);
        }
    }
}
