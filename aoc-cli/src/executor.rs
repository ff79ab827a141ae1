//! Runs the selected solvers on a rayon pool and streams their results

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, CliError, ExecutorError};
use crate::input::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::sync::mpsc::Sender;

/// Outcome of one part of one day
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    /// The answer, or why there is none; shared by every part a failure
    /// before solving (missing input, parse error) applies to
    pub answer: Result<String, Arc<CliError>>,
    pub solve_duration: TimeDelta,
    /// Set on the first result produced by a parsed instance only, so the
    /// summary counts each parse once
    pub parse_duration: Option<TimeDelta>,
}

/// One registered day and the parts of it to run
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

impl WorkItem {
    fn label(&self) -> String {
        format!("{}/{:02}", self.year, self.day)
    }
}

pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

/// The part of the executor shared by reference with the worker threads
pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Registered days passing the year/day/part filters, in year/day order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.sync_executor_config.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Run every work item and send one result per part to `tx`
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let cfg = &self.sync_executor_config;

        match cfg.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, cfg) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year
                        .into_par_iter()
                        .map(|items| {
                            items.iter().fold(None, |err, work| {
                                merge_errors(err, run_work_item(work, &tx, cfg).err())
                            })
                        })
                        .reduce_with(merge_errors)
                        .flatten()
                        .map_or(Ok(()), Err)
                })
            }
            // Part additionally splits each day's parts in run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .into_par_iter()
                    .map(|work| run_work_item(&work, &tx, cfg).err())
                    .reduce_with(merge_errors)
                    .flatten()
                    .map_or(Ok(()), Err)
            }),
        }
    }
}

fn merge_errors(
    first: Option<ArcExecutorError>,
    second: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match (first, second) {
        (Some(first), Some(second)) => Some(ArcExecutorError::combine(first, second)),
        (first, second) => first.or(second),
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Send the same failure for every part of `work`
fn send_failure(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    error: CliError,
) -> Result<(), ArcExecutorError> {
    let error = Arc::new(error);
    for part in work.parts.clone() {
        send(
            tx,
            SolverResult {
                year: work.year,
                day: work.day,
                part,
                answer: Err(Arc::clone(&error)),
                solve_duration: TimeDelta::zero(),
                parse_duration: None,
            },
        )?;
    }
    Ok(())
}

/// Read the input for one day and solve its parts
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let input = match cfg.inputs.get(work.year, work.day) {
        Ok(input) => input,
        Err(e) => {
            log::warn!("skipping {}: {}", work.label(), e);
            return send_failure(work, tx, e.into());
        }
    };

    if matches!(cfg.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, &cfg.registry)
    } else {
        run_parts_sequential(work, &input, tx, &cfg.registry)
    }
}

/// Parse once and solve the parts in order on one instance, so later parts
/// see what earlier parts cached
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let mut solver = match registry.create_solver(work.year, work.day, input) {
        Ok(solver) => solver,
        Err(e) => return send_failure(work, tx, e.into()),
    };

    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        send(tx, solve_part(&mut *solver, part, parse_duration.take()))?;
    }
    Ok(())
}

/// Each part gets its own parsed instance; results are buffered so they
/// are sent in part order
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (result_tx, result_rx) = std::sync::mpsc::channel();
    let (year, day) = (work.year, work.day);

    work.parts
        .clone()
        .into_par_iter()
        .for_each_with(result_tx, |rtx, part| {
            let result = match registry.create_solver(year, day, input) {
                Ok(mut solver) => {
                    let parse_duration = solver.parse_duration();
                    solve_part(&mut *solver, part, Some(parse_duration))
                }
                Err(e) => SolverResult {
                    year,
                    day,
                    part,
                    answer: Err(Arc::new(e.into())),
                    solve_duration: TimeDelta::zero(),
                    parse_duration: None,
                },
            };
            rtx.send(result).ok();
        });

    let start_part = *work.parts.start();
    let mut buffer: Vec<Option<SolverResult>> = work.parts.clone().map(|_| None).collect();
    let mut next = 0;

    for result in result_rx {
        let idx = usize::from(result.part - start_part);
        if let Some(slot) = buffer.get_mut(idx) {
            *slot = Some(result);
        }
        while let Some(result) = buffer.get_mut(next).and_then(Option::take) {
            send(tx, result)?;
            next += 1;
        }
    }
    Ok(())
}

fn solve_part(
    solver: &mut dyn DynSolver,
    part: u8,
    parse_duration: Option<TimeDelta>,
) -> SolverResult {
    let (answer, solve_duration) = match solver.solve(part) {
        Ok(result) => {
            let duration = result.duration();
            (Ok(result.answer), duration)
        }
        Err(e) => {
            log::debug!(
                "{}/{:02} part {} failed: {}",
                solver.year(),
                solver.day(),
                part,
                e
            );
            (
                Err(Arc::new(CliError::Solver(e.into()))),
                TimeDelta::zero(),
            )
        }
    };

    SolverResult {
        year: solver.year(),
        day: solver.day(),
        part,
        answer,
        solve_duration,
        parse_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    /// Sums the numbers on part 1, multiplies them on part 2
    struct Arithmetic;

    impl AocParser for Arithmetic {
        type SharedData<'a> = Vec<u64>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .split_whitespace()
                .map(|n| {
                    n.parse()
                        .map_err(|_| ParseError::InvalidFormat(n.to_string()))
                })
                .collect()
        }
    }

    impl Solver for Arithmetic {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok(shared.iter().sum::<u64>().to_string()),
                2 => Ok(shared.iter().product::<u64>().to_string()),
                _ => Err(SolveError::PartOutOfRange(part)),
            }
        }
    }

    fn executor(dir: &TempDir, extra_args: &[&str]) -> Executor {
        let registry = SolverRegistryBuilder::new()
            .register::<Arithmetic>(2020, 1)
            .unwrap()
            .register::<Arithmetic>(2020, 2)
            .unwrap()
            .register::<Arithmetic>(2021, 1)
            .unwrap()
            .build();

        let input_dir = dir.path().to_string_lossy().into_owned();
        let mut args = vec!["aoc", "--input-dir", input_dir.as_str()];
        args.extend_from_slice(extra_args);
        let config = Config::from_args(Args::parse_from(args)).unwrap();
        Executor::new(registry, &config).unwrap()
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<SolverResult> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    fn answers(results: &[SolverResult]) -> Vec<Option<&str>> {
        results
            .iter()
            .map(|r| r.answer.as_ref().ok().map(String::as_str))
            .collect()
    }

    fn write_inputs(dir: &TempDir) {
        fs::write(dir.path().join("2020_day01.txt"), "2 3 4\n").unwrap();
        fs::write(dir.path().join("2020_day02.txt"), "5 5\n").unwrap();
        fs::write(dir.path().join("2021_day01.txt"), "1 x\n").unwrap();
    }

    #[test]
    fn test_collect_work_items_filters() {
        let dir = TempDir::new().unwrap();

        let all = executor(&dir, &[]).collect_work_items();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].parts, 1..=2);

        let filtered = executor(&dir, &["-y", "2020", "-p", "2"]).collect_work_items();
        assert_eq!(
            filtered
                .iter()
                .map(|w| (w.year, w.day, w.parts.clone()))
                .collect::<Vec<_>>(),
            vec![(2020, 1, 2..=2), (2020, 2, 2..=2)]
        );

        assert!(executor(&dir, &["-d", "9"]).collect_work_items().is_empty());
    }

    #[test]
    fn test_every_mode_gives_the_same_answers() {
        let dir = TempDir::new().unwrap();
        write_inputs(&dir);

        for mode in ["sequential", "year", "day", "part"] {
            let results = run(&executor(&dir, &["--parallelize-by", mode, "--threads", "2"]));
            assert_eq!(
                answers(&results),
                vec![Some("9"), Some("24"), Some("10"), Some("25"), None, None],
                "mode {mode}"
            );
        }
    }

    #[test]
    fn test_parse_duration_reported_once_per_instance() {
        let dir = TempDir::new().unwrap();
        write_inputs(&dir);

        let results = run(&executor(&dir, &["-y", "2020", "-d", "1", "--parallelize-by", "day"]));
        assert_eq!(results.len(), 2);
        assert!(results[0].parse_duration.is_some());
        assert!(results[1].parse_duration.is_none());

        let results = run(&executor(&dir, &["-y", "2020", "-d", "1", "--parallelize-by", "part"]));
        assert!(results.iter().all(|r| r.parse_duration.is_some()));
    }

    #[test]
    fn test_missing_input_fails_every_part() {
        let dir = TempDir::new().unwrap();

        let results = run(&executor(&dir, &["-y", "2021"]));
        assert_eq!(results.len(), 2);
        for result in &results {
            let error = result.answer.as_ref().unwrap_err();
            assert!(matches!(**error, CliError::Input(_)));
        }
    }

    #[test]
    fn test_parse_error_reported_per_part() {
        let dir = TempDir::new().unwrap();
        write_inputs(&dir);

        let results = run(&executor(&dir, &["-y", "2021"]));
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| matches!(
            r.answer.as_ref().map_err(|e| &**e),
            Err(CliError::Solver(aoc_solver::SolverError::ParseError(_)))
        )));
    }
}
