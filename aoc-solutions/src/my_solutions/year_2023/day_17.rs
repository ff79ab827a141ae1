use crate::utils::matrix::Matrix;
use crate::utils::parse::invalid;
use crate::utils::point::{Direction, Point};
use crate::utils::search::a_star;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 17, tags = ["2023", "grid", "pathfinding"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Matrix<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Matrix::parse_digits(input).map_err(|e| invalid(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Crucible {
    position: Point,
    /// `None` only before the first move
    heading: Option<Direction>,
    run: u8,
}

/// Least heat lost from the top-left to the bottom-right corner when the
/// crucible must go straight between `min_run` and `max_run` blocks
fn least_heat_loss(city: &Matrix<u8>, min_run: u8, max_run: u8) -> Option<u64> {
    let goal = Point::new(city.width() as i32 - 1, city.height() as i32 - 1);
    let start = Crucible {
        position: Point::origin(),
        heading: None,
        run: 0,
    };

    let successors = |state: &Crucible| {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                let run = match state.heading {
                    None => 1,
                    Some(heading) if heading == direction => state.run + 1,
                    Some(heading) if heading == direction.opposite() => return None,
                    Some(_) if state.run < min_run => return None,
                    Some(_) => 1,
                };
                if run > max_run {
                    return None;
                }
                let position = state.position.neighbor(direction);
                let heat = *city.get(position)?;
                let next = Crucible {
                    position,
                    heading: Some(direction),
                    run,
                };
                Some((next, u64::from(heat)))
            })
            .collect::<Vec<_>>()
    };

    a_star(
        start,
        successors,
        |state| state.position.manhattan_distance(goal) as u64,
        |state| state.position == goal && state.run >= min_run,
    )
    .map(|result| result.cost)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        least_heat_loss(shared, 1, 3)
            .map(|heat| heat.to_string())
            .ok_or_else(|| SolveError::failed("no route to the factory"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        least_heat_loss(shared, 4, 10)
            .map(|heat| heat.to_string())
            .ok_or_else(|| SolveError::failed("no route to the factory"))
    }
}
