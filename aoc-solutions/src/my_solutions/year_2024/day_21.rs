use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::parse::{invalid, lines};
use crate::utils::point::{Direction, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 21, tags = ["2024", "grid", "dynamic-programming"])]
pub struct Solver;

const NUMERIC_ROWS: [&str; 4] = ["789", "456", "123", " 0A"];
const DIRECTIONAL_ROWS: [&str; 2] = [" ^A", "<v>"];

/// Key positions of a keypad; the robot arm may never hover over `gap`
struct Keypad {
    keys: HashMap<char, Point>,
    gap: Point,
}

impl Keypad {
    fn new(rows: &[&str]) -> Self {
        let mut keys = HashMap::new();
        let mut gap = Point::origin();
        for (y, row) in rows.iter().enumerate() {
            for (x, key) in row.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                if key == ' ' {
                    gap = p;
                } else {
                    keys.insert(key, p);
                }
            }
        }
        Self { keys, gap }
    }

    /// Shortest key sequences on the keypad above that move the arm from
    /// `from` to `to` and press it, ending in `A`. Only the two paths that
    /// turn at most once are considered; any other shortest path zigzags
    /// and costs more upstream.
    fn paths(&self, from: char, to: char) -> Vec<Vec<char>> {
        let (Some(&a), Some(&b)) = (self.keys.get(&from), self.keys.get(&to)) else {
            return Vec::new();
        };
        let horizontal = if b.x < a.x { Direction::Left } else { Direction::Right };
        let vertical = if b.y < a.y { Direction::Up } else { Direction::Down };
        let moves = |direction: Direction, count: i32| {
            std::iter::repeat_n(arrow(direction), count.unsigned_abs() as usize)
        };

        let mut paths = Vec::new();
        if Point::new(b.x, a.y) != self.gap {
            let path: Vec<char> = moves(horizontal, b.x - a.x)
                .chain(moves(vertical, b.y - a.y))
                .chain(['A'])
                .collect();
            paths.push(path);
        }
        if Point::new(a.x, b.y) != self.gap {
            let path: Vec<char> = moves(vertical, b.y - a.y)
                .chain(moves(horizontal, b.x - a.x))
                .chain(['A'])
                .collect();
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }
}

fn arrow(direction: Direction) -> char {
    match direction {
        Direction::Up => '^',
        Direction::Right => '>',
        Direction::Down => 'v',
        Direction::Left => '<',
    }
}

/// Moving one arm from `from` to `to` and pressing it, with `robots`
/// directional keypads between that arm and the human
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Press {
    numeric: bool,
    from: char,
    to: char,
    robots: u8,
}

/// Fewest human button presses for a [`Press`]
struct ButtonPresses {
    numeric: Keypad,
    directional: Keypad,
}

impl ButtonPresses {
    fn paths(&self, press: &Press) -> Vec<Vec<char>> {
        let keypad = if press.numeric {
            &self.numeric
        } else {
            &self.directional
        };
        keypad.paths(press.from, press.to)
    }
}

/// Consecutive key pairs of `keys`, starting from the `A` every arm rests on
fn strokes(keys: &[char]) -> impl Iterator<Item = (char, char)> + '_ {
    std::iter::once('A').chain(keys.iter().copied()).zip(keys.iter().copied())
}

impl DpProblem<Press, u64> for ButtonPresses {
    fn deps(&self, press: &Press) -> Vec<Press> {
        if press.robots == 0 {
            return vec![];
        }
        self.paths(press)
            .iter()
            .flat_map(|path| {
                strokes(path)
                    .map(|(from, to)| Press {
                        numeric: false,
                        from,
                        to,
                        robots: press.robots - 1,
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// `deps` holds each path's strokes back to back, so they are split
    /// again by path length
    fn compute(&self, press: &Press, deps: Vec<u64>) -> u64 {
        let paths = self.paths(press);
        if press.robots == 0 {
            return paths.first().map_or(0, |path| path.len() as u64);
        }
        let mut costs = deps.into_iter();
        paths
            .iter()
            .map(|path| costs.by_ref().take(path.len()).sum::<u64>())
            .min()
            .unwrap_or(0)
    }
}

pub struct Code {
    keys: Vec<char>,
    value: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Code>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input)
            .map(|line| -> Result<Code, ParseError> {
                if !line.chars().all(|c| c.is_ascii_digit() || c == 'A') {
                    return Err(invalid(format!("bad door code {line:?}")));
                }
                let digits: String = line.chars().filter(char::is_ascii_digit).collect();
                let value = digits
                    .parse()
                    .map_err(|e| invalid(format!("door code {line:?}: {e}")))?;
                Ok(Code {
                    keys: line.chars().collect(),
                    value,
                })
            })
            .collect()
    }
}

fn complexity(codes: &[Code], robots: u8) -> u64 {
    let cache = DpCache::with_problem(
        HashMapBackend::new(),
        ButtonPresses {
            numeric: Keypad::new(&NUMERIC_ROWS),
            directional: Keypad::new(&DIRECTIONAL_ROWS),
        },
    );
    codes
        .iter()
        .map(|code| {
            let presses: u64 = strokes(&code.keys)
                .map(|(from, to)| {
                    cache.get(&Press {
                        numeric: true,
                        from,
                        to,
                        robots,
                    })
                })
                .sum();
            presses * code.value
        })
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(complexity(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(complexity(shared, 25).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        029A
        980A
        179A
        456A
        379A
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "126384");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "154115708116294");
    }

    #[test]
    fn test_sequence_lengths() {
        let codes = Solver::parse("029A").unwrap();
        // <A^A>^^AvvvA typed directly
        assert_eq!(complexity(&codes, 0), 12 * 29);
        assert_eq!(complexity(&codes, 1), 28 * 29);
        assert_eq!(complexity(&codes, 2), 68 * 29);
    }

    #[test]
    fn test_paths_avoid_gap() {
        let numeric = Keypad::new(&NUMERIC_ROWS);
        // From 0 to 1 the arm must go up before going left
        assert_eq!(numeric.paths('0', '1'), vec![vec!['^', '<', 'A']]);
        assert_eq!(numeric.paths('A', 'A'), vec![vec!['A']]);

        let directional = Keypad::new(&DIRECTIONAL_ROWS);
        assert_eq!(directional.paths('<', 'A'), vec![vec!['>', '>', '^', 'A']]);
    }

    #[test]
    fn test_bad_code() {
        assert!(Solver::parse("02BA\n").is_err());
    }
}
