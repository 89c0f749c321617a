//! Side-by-side timing of every algorithm on one baseline array

use std::fmt;
use std::time::{Duration, Instant};

use sv_core::{generate_isolated, TraceGenerator, Value};
use tracing::{info, warn};

use crate::catalog::Algorithm;

/// Result of running one generator
#[derive(Debug, Clone)]
pub struct BenchmarkLine {
    pub name: String,
    pub outcome: Result<BenchmarkResult, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkResult {
    pub elapsed: Duration,
    pub operation_count: usize,
}

impl fmt::Display for BenchmarkLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(result) => write!(
                f,
                "{}: {:.2}ms ({} operations)",
                self.name,
                result.elapsed.as_secs_f64() * 1000.0,
                result.operation_count
            ),
            Err(error) => write!(f, "{}: Error - {}", self.name, error),
        }
    }
}

/// One line per generator, in the order they were run
#[derive(Debug, Clone, Default)]
pub struct BenchmarkReport {
    pub lines: Vec<BenchmarkLine>,
}

impl BenchmarkReport {
    pub fn failures(&self) -> usize {
        self.lines.iter().filter(|line| line.outcome.is_err()).count()
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Run each generator on its own copy of `baseline`
///
/// A failing generator (error or panic) yields an error line and the rest
/// still run.
pub fn run_benchmark(generators: &[&dyn TraceGenerator], baseline: &[Value]) -> BenchmarkReport {
    let lines = generators
        .iter()
        .map(|generator| {
            let input = baseline.to_vec();
            let started = Instant::now();
            let outcome = generate_isolated(*generator, &input)
                .map(|trace| BenchmarkResult {
                    elapsed: started.elapsed(),
                    operation_count: trace.len(),
                })
                .map_err(|err| format!("{err:#}"));

            let line = BenchmarkLine {
                name: generator.name().to_string(),
                outcome,
            };
            match &line.outcome {
                Ok(_) => info!("{}", line),
                Err(_) => warn!("{}", line),
            }
            line
        })
        .collect();

    BenchmarkReport { lines }
}

/// Benchmark all twelve algorithms in table order
pub fn compare_all(baseline: &[Value]) -> BenchmarkReport {
    let algorithms = Algorithm::ALL;
    let generators: Vec<&dyn TraceGenerator> = algorithms
        .iter()
        .map(|algorithm| algorithm as &dyn TraceGenerator)
        .collect();
    run_benchmark(&generators, baseline)
}
