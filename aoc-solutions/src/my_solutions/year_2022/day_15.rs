use crate::utils::math::merge_intervals;
use crate::utils::parse::{fixed_numbers, lines};
use crate::utils::point::Point2D;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 15, tags = ["2022", "math"])]
pub struct Solver;

const ROW: i64 = 2_000_000;
const EXAMPLE_ROW: i64 = 10;
const BOUND: i64 = 4_000_000;
const EXAMPLE_BOUND: i64 = 20;
const TUNING_MULTIPLIER: i64 = 4_000_000;

type Point = Point2D<i64>;

pub struct Sensor {
    position: Point,
    beacon: Point,
    radius: i64,
}

pub struct SharedData {
    sensors: Vec<Sensor>,
    /// Small coordinates mean the puzzle's example input
    is_example: bool,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let sensors = lines(input)
            .map(|line| -> Result<Sensor, ParseError> {
                let [sx, sy, bx, by] = fixed_numbers::<i64, 4>(line)?;
                let (position, beacon) = (Point::new(sx, sy), Point::new(bx, by));
                Ok(Sensor {
                    position,
                    beacon,
                    radius: position.manhattan_distance(beacon),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let is_example = sensors.iter().map(|s| s.beacon.y).max().unwrap_or(0) <= 100;
        Ok(SharedData {
            sensors,
            is_example,
        })
    }
}

/// Merged x-intervals of `row` covered by some sensor
fn row_coverage(sensors: &[Sensor], row: i64) -> Vec<(i64, i64)> {
    merge_intervals(sensors.iter().filter_map(|sensor| {
        let reach = sensor.radius - (sensor.position.y - row).abs();
        (reach >= 0).then(|| (sensor.position.x - reach, sensor.position.x + reach))
    }))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let row = if shared.is_example { EXAMPLE_ROW } else { ROW };
        let covered: i64 = row_coverage(&shared.sensors, row)
            .iter()
            .map(|(start, end)| end - start + 1)
            .sum();
        let beacons_in_row = shared
            .sensors
            .iter()
            .filter(|s| s.beacon.y == row)
            .map(|s| s.beacon.x)
            .collect::<HashSet<_>>()
            .len() as i64;
        Ok((covered - beacons_in_row).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let bound = if shared.is_example { EXAMPLE_BOUND } else { BOUND };
        for y in 0..=bound {
            let clipped = merge_intervals(
                row_coverage(&shared.sensors, y)
                    .into_iter()
                    .filter(|&(start, end)| end >= 0 && start <= bound)
                    .map(|(start, end)| (start.max(0), end.min(bound))),
            );
            let gap = match clipped.first() {
                None => Some(0),
                Some(&(start, _)) if start > 0 => Some(0),
                Some(&(_, end)) if end < bound => Some(end + 1),
                Some(_) => None,
            };
            if let Some(x) = gap {
                return Ok((x * TUNING_MULTIPLIER + y).to_string());
            }
        }
        Err(SolveError::failed("every position is covered"))
    }
}
