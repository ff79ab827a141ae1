use crate::utils::parse::{blocks, invalid, lines, missing, unsigned_numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::ops::Range;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 5, tags = ["2023", "intervals"])]
pub struct Solver;

/// Source numbers in `source` move by `shift`
#[derive(Debug, Clone)]
struct Mapping {
    source: Range<i64>,
    shift: i64,
}

pub struct Almanac {
    seeds: Vec<i64>,
    /// The seed-to-soil through humidity-to-location maps, in order
    maps: Vec<Vec<Mapping>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Almanac;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let sections = blocks(input);
        let (seeds, maps) = sections
            .split_first()
            .ok_or_else(|| missing("empty almanac"))?;
        let seeds = seeds
            .strip_prefix("seeds:")
            .ok_or_else(|| invalid("the almanac does not start with its seeds"))?;

        let maps = maps
            .iter()
            .map(|section| {
                lines(section)
                    .skip(1)
                    .map(|line| -> Result<Mapping, ParseError> {
                        let [destination, source, length] = unsigned_numbers::<i64>(line)?[..]
                        else {
                            return Err(invalid(format!("bad mapping {line:?}")));
                        };
                        Ok(Mapping {
                            source: source..source + length,
                            shift: destination - source,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<_, _>>()?;

        Ok(Almanac {
            seeds: unsigned_numbers(seeds)?,
            maps,
        })
    }
}

/// Sends every range through one map. Parts of a range no mapping covers
/// keep their numbers.
fn apply_map(ranges: Vec<Range<i64>>, map: &[Mapping]) -> Vec<Range<i64>> {
    let mut pending = ranges;
    let mut mapped = Vec::new();

    while let Some(range) = pending.pop() {
        let hit = map
            .iter()
            .find(|mapping| range.start < mapping.source.end && mapping.source.start < range.end);
        let Some(mapping) = hit else {
            mapped.push(range);
            continue;
        };

        let start = range.start.max(mapping.source.start);
        let end = range.end.min(mapping.source.end);
        mapped.push(start + mapping.shift..end + mapping.shift);
        if range.start < start {
            pending.push(range.start..start);
        }
        if end < range.end {
            pending.push(end..range.end);
        }
    }
    mapped
}

impl Almanac {
    fn lowest_location(&self, seeds: Vec<Range<i64>>) -> Result<i64, SolveError> {
        self.maps
            .iter()
            .fold(seeds, |ranges, map| apply_map(ranges, map))
            .into_iter()
            .map(|range| range.start)
            .min()
            .ok_or_else(|| SolveError::failed("no seeds to plant"))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let seeds = shared.seeds.iter().map(|&seed| seed..seed + 1).collect();
        Ok(shared.lowest_location(seeds)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// The seed line holds pairs of range start and length
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.seeds.len() % 2 != 0 {
            return Err(SolveError::failed("seed ranges need a start and a length"));
        }
        let seeds = shared
            .seeds
            .chunks(2)
            .map(|pair| pair[0]..pair[0] + pair[1])
            .collect();
        Ok(shared.lowest_location(seeds)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        seeds: 79 14 55 13

        seed-to-soil map:
        50 98 2
        52 50 48

        soil-to-fertilizer map:
        0 15 37
        37 52 2
        39 0 15

        fertilizer-to-water map:
        49 53 8
        0 11 42
        42 0 7
        57 7 4

        water-to-light map:
        88 18 7
        18 25 70

        light-to-temperature map:
        45 77 23
        81 45 19
        68 64 13

        temperature-to-humidity map:
        0 69 1
        1 0 69

        humidity-to-location map:
        60 56 37
        56 93 4
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.maps.len(), 7);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "35");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "46");
    }

    #[test]
    fn test_range_split_across_mappings() {
        let map = [
            Mapping {
                source: 10..20,
                shift: 100,
            },
            Mapping {
                source: 20..25,
                shift: -20,
            },
        ];
        let mut ranges = apply_map(vec![5..30], &map);
        ranges.sort_by_key(|range| range.start);
        assert_eq!(ranges, vec![0..5, 5..10, 25..30, 110..120]);
    }
}
