//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::Instant;

/// Prints results as they become ready and a summary at the end
pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    /// Answers go to stdout, errors to stderr
    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{}", answer),
            (Ok(answer), false) => println!("{}", format_answer_line(result, answer)),
            (Err(e), true) => eprintln!("Error: {}", e),
            (Err(e), false) => eprintln!("{}: Error - {}", result_prefix(result), e),
        }
    }

    /// Counts, summed parse and solve time, wall-clock time and how much the
    /// parallel run gained over running everything back to back
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let summary = Summary::of(results);
        let elapsed = TimeDelta::from_std(self.start_time.elapsed()).unwrap_or(TimeDelta::MAX);

        println!();
        println!("--- Summary ---");
        println!(
            "Solvers: {} solved, {} failed",
            summary.solved, summary.failed
        );
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!("Elapsed wall-clock time: {}", format_duration(elapsed));
        if let Some(speedup) = summary.speedup(elapsed) {
            println!("Speedup factor: {:.2}x", speedup);
        }
    }
}

/// Totals over every received result; times only count successful parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub solved: usize,
    pub failed: usize,
    pub parse_time: TimeDelta,
    pub solve_time: TimeDelta,
}

impl Summary {
    pub fn of(results: &[SolverResult]) -> Self {
        let solved: Vec<&SolverResult> = results.iter().filter(|r| r.answer.is_ok()).collect();
        Self {
            solved: solved.len(),
            failed: results.len() - solved.len(),
            parse_time: solved.iter().filter_map(|r| r.parse_duration).sum(),
            solve_time: solved.iter().map(|r| r.solve_duration).sum(),
        }
    }

    /// Summed compute time over wall-clock time, `None` for an instant run
    pub fn speedup(&self, elapsed: TimeDelta) -> Option<f64> {
        let elapsed = elapsed.num_microseconds().filter(|&micros| micros > 0)?;
        let compute = (self.parse_time + self.solve_time).num_microseconds()?;
        Some(compute as f64 / elapsed as f64)
    }
}

fn result_prefix(result: &SolverResult) -> String {
    format!("{}/{:02} Part {}", result.year, result.day, result.part)
}

fn format_answer_line(result: &SolverResult, answer: &str) -> String {
    let parse_timing = result
        .parse_duration
        .map(|d| format!("parse: {}, ", format_duration(d)))
        .unwrap_or_default();
    format!(
        "{}: {} ({}solve: {})",
        result_prefix(result),
        answer,
        parse_timing,
        format_duration(result.solve_duration)
    )
}

/// Microseconds below 1ms, milliseconds below 1s, seconds otherwise
pub fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn result(part: u8, answer: Result<&str, CliError>, parse_ms: Option<i64>) -> SolverResult {
        SolverResult {
            year: 2024,
            day: 5,
            part,
            answer: answer.map(str::to_string).map_err(Arc::new),
            solve_duration: TimeDelta::milliseconds(3),
            parse_duration: parse_ms.map(TimeDelta::milliseconds),
        }
    }

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(TimeDelta::microseconds(0)), "0µs");
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-20)), "-20µs");
        assert_eq!(format_duration(TimeDelta::MAX), "N/A");
    }

    #[test]
    fn test_answer_line() {
        let first = result(1, Ok("143"), Some(2));
        assert_eq!(
            format_answer_line(&first, "143"),
            "2024/05 Part 1: 143 (parse: 2.00ms, solve: 3.00ms)"
        );

        let second = result(2, Ok("123"), None);
        assert_eq!(
            format_answer_line(&second, "123"),
            "2024/05 Part 2: 123 (solve: 3.00ms)"
        );
    }

    #[test]
    fn test_summary_counts_successes_only() {
        let results = vec![
            result(1, Ok("1"), Some(4)),
            result(2, Ok("2"), None),
            result(1, Err(CliError::Config("boom".into())), Some(100)),
        ];
        let summary = Summary::of(&results);

        assert_eq!(summary.solved, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.parse_time, TimeDelta::milliseconds(4));
        assert_eq!(summary.solve_time, TimeDelta::milliseconds(6));
        assert_eq!(summary.speedup(TimeDelta::milliseconds(5)), Some(2.0));
        assert_eq!(summary.speedup(TimeDelta::zero()), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// **Feature: output, Property 1: Durations pick the largest unit below the value**
        #[test]
        fn prop_format_duration_unit(micros in 0i64..100_000_000) {
            let formatted = format_duration(TimeDelta::microseconds(micros));
            let expected_suffix = if micros < 1000 {
                "µs"
            } else if micros < 1_000_000 {
                "ms"
            } else {
                "s"
            };
            prop_assert!(formatted.ends_with(expected_suffix));
            if micros >= 1000 {
                prop_assert!(!formatted.ends_with("µs"));
            }
        }
    }
}
