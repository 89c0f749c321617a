//! The algorithm table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sv_core::{OperationTrace, TraceGenerator, Value};

use crate::sorts;
use crate::SortError;

/// One of the twelve visualized algorithms, in table order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bubble,
    Insertion,
    Selection,
    Merge,
    Quick,
    Heap,
    Shell,
    Counting,
    Comb,
    Cocktail,
    Bucket,
    Radix,
}

impl Algorithm {
    /// Every algorithm in declaration order
    pub const ALL: [Algorithm; 12] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Selection,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Heap,
        Algorithm::Shell,
        Algorithm::Counting,
        Algorithm::Comb,
        Algorithm::Cocktail,
        Algorithm::Bucket,
        Algorithm::Radix,
    ];

    /// Configuration key
    pub fn key(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Insertion => "insertion",
            Algorithm::Selection => "selection",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Heap => "heap",
            Algorithm::Shell => "shell",
            Algorithm::Counting => "counting",
            Algorithm::Comb => "comb",
            Algorithm::Cocktail => "cocktail",
            Algorithm::Bucket => "bucket",
            Algorithm::Radix => "radix",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Heap => "Heap Sort",
            Algorithm::Shell => "Shell Sort",
            Algorithm::Counting => "Counting Sort",
            Algorithm::Comb => "Comb Sort",
            Algorithm::Cocktail => "Cocktail Shaker Sort",
            Algorithm::Bucket => "Bucket Sort",
            Algorithm::Radix => "Radix Sort",
        }
    }

    pub fn time_complexity(self) -> &'static str {
        match self {
            Algorithm::Bubble | Algorithm::Insertion => "O(n²) avg, O(n) best",
            Algorithm::Selection | Algorithm::Cocktail => "O(n²)",
            Algorithm::Merge | Algorithm::Heap => "O(n log n)",
            Algorithm::Quick => "O(n log n) avg, O(n²) worst",
            Algorithm::Shell => "≈ O(n^(3/2))",
            Algorithm::Counting => "O(n + k)",
            Algorithm::Comb => "O(n²) worst, better in practice than bubble",
            Algorithm::Bucket => "O(n + k) avg, O(n²) worst",
            Algorithm::Radix => "O(d·(n + b))",
        }
    }

    pub fn space_complexity(self) -> &'static str {
        match self {
            Algorithm::Bubble
            | Algorithm::Insertion
            | Algorithm::Selection
            | Algorithm::Heap
            | Algorithm::Shell
            | Algorithm::Comb
            | Algorithm::Cocktail => "O(1)",
            Algorithm::Merge => "O(n)",
            Algorithm::Quick => "O(log n)",
            Algorithm::Counting => "O(k)",
            Algorithm::Bucket => "O(n + k)",
            Algorithm::Radix => "O(n + b)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Repeatedly swap adjacent out-of-order items until the list is sorted",
            Algorithm::Insertion => "Build the sorted list one element at a time by inserting into the correct position",
            Algorithm::Selection => "Select the minimum element in each pass and move it to its final spot",
            Algorithm::Merge => "Recursively split the array and merge sorted halves back together",
            Algorithm::Quick => "Partition around a pivot then recursively sort subarrays",
            Algorithm::Heap => "Build a max-heap and repeatedly extract the largest element",
            Algorithm::Shell => "Perform insertion sort with a decreasing gap sequence",
            Algorithm::Counting => "Count the frequency of each value and rebuild the array",
            Algorithm::Comb => "Reduce gaps over passes to eliminate small values faster",
            Algorithm::Cocktail => "Bidirectional bubble sort that alternates forward and backward passes",
            Algorithm::Bucket => "Distribute elements into buckets then sort each bucket individually",
            Algorithm::Radix => "Sort numbers by processing digits least-significant first",
        }
    }

    /// Generate the operation trace for `input`
    pub fn trace(self, input: &[Value]) -> Result<OperationTrace, SortError> {
        let trace = match self {
            Algorithm::Bubble => sorts::bubble_sort(input),
            Algorithm::Insertion => sorts::insertion_sort(input),
            Algorithm::Selection => sorts::selection_sort(input),
            Algorithm::Merge => sorts::merge_sort(input),
            Algorithm::Quick => sorts::quick_sort(input),
            Algorithm::Heap => sorts::heap_sort(input),
            Algorithm::Shell => sorts::shell_sort(input),
            Algorithm::Counting => sorts::counting_sort(input)?,
            Algorithm::Comb => sorts::comb_sort(input),
            Algorithm::Cocktail => sorts::cocktail_sort(input),
            Algorithm::Bucket => sorts::bucket_sort(input),
            Algorithm::Radix => sorts::radix_sort(input),
        };
        Ok(trace)
    }
}

impl TraceGenerator for Algorithm {
    fn name(&self) -> &str {
        self.display_name()
    }

    fn generate(&self, input: &[Value]) -> anyhow::Result<OperationTrace> {
        Ok(self.trace(input)?)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown algorithm '{}'", s))
    }
}
