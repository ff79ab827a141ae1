use crate::utils::parse::{invalid, lines, numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 24, tags = ["2023", "geometry", "math"])]
pub struct Solver;

/// Test area for the real input, inclusive on both sides
const TEST_AREA: (i128, i128) = (200_000_000_000_000, 400_000_000_000_000);

/// Rock velocities tried per axis, from `-ROCK_SPEED` to `ROCK_SPEED`
const ROCK_SPEED: i128 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hailstone {
    position: [i128; 3],
    velocity: [i128; 3],
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hailstone>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input)
            .map(|line| -> Result<Hailstone, ParseError> {
                let [px, py, pz, vx, vy, vz] = numbers::<i128>(line)?[..] else {
                    return Err(invalid(format!("bad hailstone {line:?}")));
                };
                Ok(Hailstone {
                    position: [px, py, pz],
                    velocity: [vx, vy, vz],
                })
            })
            .collect()
    }
}

fn cross(a: (i128, i128), b: (i128, i128)) -> i128 {
    a.0 * b.1 - a.1 * b.0
}

/// Times along two xy paths, as `(numerator_a, numerator_b, denominator)`,
/// at which they meet; `None` for parallel paths
fn meeting_times(
    (pa, va): ((i128, i128), (i128, i128)),
    (pb, vb): ((i128, i128), (i128, i128)),
) -> Option<(i128, i128, i128)> {
    let denominator = cross(va, vb);
    if denominator == 0 {
        return None;
    }
    let offset = (pb.0 - pa.0, pb.1 - pa.1);
    let (a, b) = (cross(offset, vb), cross(offset, va));
    // Keeps the denominator positive so signs can be compared directly
    Some(if denominator < 0 {
        (-a, -b, -denominator)
    } else {
        (a, b, denominator)
    })
}

impl Hailstone {
    fn xy(&self) -> ((i128, i128), (i128, i128)) {
        (
            (self.position[0], self.position[1]),
            (self.velocity[0], self.velocity[1]),
        )
    }

    /// The same hailstone seen from a rock moving at `rock`
    fn relative_to(&self, rock: [i128; 3]) -> Hailstone {
        Hailstone {
            position: self.position,
            velocity: [
                self.velocity[0] - rock[0],
                self.velocity[1] - rock[1],
                self.velocity[2] - rock[2],
            ],
        }
    }
}

/// Pairs of hailstones whose future xy paths cross inside `min..=max`
fn crossings_within(hail: &[Hailstone], (min, max): (i128, i128)) -> usize {
    hail.iter()
        .tuple_combinations()
        .filter(|(a, b)| {
            let Some((ta, tb, d)) = meeting_times(a.xy(), b.xy()) else {
                return false;
            };
            let ((px, py), (vx, vy)) = a.xy();
            let inside = |p: i128, v: i128| (min * d..=max * d).contains(&(p * d + ta * v));
            ta >= 0 && tb >= 0 && inside(px, vx) && inside(py, vy)
        })
        .count()
}

/// Start of the rock that hits every hailstone, for a rock velocity whose xy
/// part is `(vx, vy)`
fn rock_start(hail: &[Hailstone], vx: i128, vy: i128) -> Option<[i128; 3]> {
    let relative = |h: &Hailstone| h.relative_to([vx, vy, 0]);
    let first = relative(hail.first()?);

    // Any path not parallel to the first one pins down the meeting point
    let (other, (t0, t1, d)) = hail[1..].iter().map(relative).find_map(|h| {
        meeting_times(first.xy(), h.xy()).map(|times| (h, times))
    })?;
    if t0 % d != 0 || t1 % d != 0 || t0 == t1 {
        return None;
    }
    let (t0, t1) = (t0 / d, t1 / d);
    let x = first.position[0] + t0 * first.velocity[0];
    let y = first.position[1] + t0 * first.velocity[1];

    // Both hits line up in z too
    let z0 = first.position[2] + t0 * first.velocity[2];
    let z1 = other.position[2] + t1 * other.velocity[2];
    if (z0 - z1) % (t0 - t1) != 0 {
        return None;
    }
    let vz = (z0 - z1) / (t0 - t1);
    let z = z0 - t0 * vz;

    let hits_all = hail.iter().map(relative).all(|h| {
        let (dx, dy) = (x - h.position[0], y - h.position[1]);
        if cross((dx, dy), (h.velocity[0], h.velocity[1])) != 0 {
            return false;
        }
        let (distance, speed) = match h.velocity {
            [0, 0, _] => return dx == 0 && dy == 0,
            [0, v, _] => (dy, v),
            [v, _, _] => (dx, v),
        };
        distance % speed == 0
            && h.position[2] + distance / speed * (h.velocity[2] - vz) == z
    });
    hits_all.then_some([x, y, z])
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(crossings_within(shared, TEST_AREA).to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Seen from the rock, every hailstone flies through the rock's start
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let start = (-ROCK_SPEED..=ROCK_SPEED)
            .cartesian_product(-ROCK_SPEED..=ROCK_SPEED)
            .find_map(|(vx, vy)| rock_start(shared, vx, vy))
            .ok_or_else(|| SolveError::failed("no rock throw hits every hailstone"))?;
        Ok(start.iter().sum::<i128>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        19, 13, 30 @ -2,  1, -2
        18, 19, 22 @ -1, -1, -2
        20, 25, 34 @ -2, -2, -4
        12, 31, 28 @ -1, -2, -1
        20, 19, 15 @  1, -5, -3
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(crossings_within(&shared, (7, 27)), 2);
        assert_eq!(rock_start(&shared, -3, 1), Some([24, 13, 10]));
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "47");
    }

    #[test]
    fn test_crossing_in_the_past() {
        // The paths cross at (0, 0), which the second stone already left
        let hail = Solver::parse("-5, 0, 0 @ 1, 0, 0\n0, 5, 0 @ 0, 1, 0\n").unwrap();
        assert_eq!(crossings_within(&hail, (-10, 10)), 0);
        let hail = Solver::parse("-5, 0, 0 @ 1, 0, 0\n0, 5, 0 @ 0, -1, 0\n").unwrap();
        assert_eq!(crossings_within(&hail, (-10, 10)), 1);
    }
}
