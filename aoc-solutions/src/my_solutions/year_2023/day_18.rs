use anyhow::{Context, anyhow, bail};
use crate::utils::math::{interior_points, shoelace_area};
use crate::utils::parse::{invalid, lines};
use crate::utils::point::{Direction, Point2D};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 18, tags = ["2023", "geometry"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dig {
    direction: Direction,
    length: i64,
}

/// Each line read both ways: the plain instruction and the one hidden in the
/// colour code
pub struct DigPlan {
    plain: Vec<Dig>,
    decoded: Vec<Dig>,
}

fn parse_line(line: &str) -> anyhow::Result<(Dig, Dig)> {
    let mut fields = line.split_whitespace();
    let (Some(direction), Some(length), Some(colour), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        bail!("expected `D N (#rrggbb)`");
    };

    let direction = direction
        .chars()
        .next()
        .context("empty direction")
        .and_then(|c| Ok(Direction::try_from(c)?))?;
    let length = length
        .parse()
        .with_context(|| format!("length {length:?}"))?;

    let hex = colour
        .strip_prefix("(#")
        .and_then(|c| c.strip_suffix(')'))
        .filter(|hex| hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
        .with_context(|| format!("bad colour {colour:?}"))?;
    let (hidden_length, hidden_direction) = hex.split_at(5);
    let hidden_length = i64::from_str_radix(hidden_length, 16)?;
    let hidden_direction = match hidden_direction {
        "0" => Direction::Right,
        "1" => Direction::Down,
        "2" => Direction::Left,
        "3" => Direction::Up,
        other => return Err(anyhow!("unknown direction digit {other:?}")),
    };

    Ok((
        Dig { direction, length },
        Dig {
            direction: hidden_direction,
            length: hidden_length,
        },
    ))
}

impl AocParser for Solver {
    type SharedData<'a> = DigPlan;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (plain, decoded) = lines(input)
            .map(|line| parse_line(line).map_err(|e| invalid(format!("{line:?}: {e:#}"))))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .unzip();
        Ok(DigPlan { plain, decoded })
    }
}

/// Cubic metres of lagoon: the trench itself plus everything it encloses
fn lagoon_volume(plan: &[Dig]) -> i64 {
    let mut position = Point2D::<i64>::origin();
    let mut vertices = Vec::with_capacity(plan.len());
    let mut boundary = 0;
    for dig in plan {
        position += dig.direction.vector() * dig.length;
        vertices.push(position);
        boundary += dig.length;
    }
    interior_points(shoelace_area(&vertices), boundary) + boundary
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon_volume(&shared.plain).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon_volume(&shared.decoded).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        R 6 (#70c710)
        D 5 (#0dc571)
        L 2 (#5713f0)
        D 2 (#d2c081)
        R 2 (#59c680)
        D 2 (#411b91)
        L 5 (#8ceee2)
        U 2 (#caa173)
        L 1 (#1b58a2)
        U 2 (#caa171)
        R 2 (#7807d2)
        U 3 (#a77fa3)
        L 2 (#015232)
        U 2 (#7a21e3)
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "62");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "952408144115");
    }

    #[test]
    fn test_decodes_colour() {
        let (_, hidden) = parse_line("R 6 (#70c710)").unwrap();
        assert_eq!(
            hidden,
            Dig {
                direction: Direction::Right,
                length: 461937
            }
        );
        assert!(parse_line("R 6 (#70c714)").is_err());
        assert!(parse_line("R 6").is_err());
    }
}
