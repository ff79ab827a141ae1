use crate::utils::parse::{invalid, lines};
use crate::utils::point::{Point3D, parse_points_3d};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 22, tags = ["2023", "simulation", "graph"])]
pub struct Solver;

/// Which bricks rest on which, once every brick has fallen into place
pub struct Stack {
    /// `below[i]`: bricks brick `i` rests directly on
    below: Vec<HashSet<usize>>,
    /// `above[i]`: bricks resting directly on brick `i`
    above: Vec<HashSet<usize>>,
}

fn settle(mut bricks: Vec<(Point3D, Point3D)>) -> Stack {
    bricks.sort_unstable_by_key(|(low, _)| low.z);
    // Top z and brick of the highest cube in each column
    let mut tops: HashMap<(i32, i32), (i32, usize)> = HashMap::new();
    let mut below = vec![HashSet::new(); bricks.len()];
    let mut above = vec![HashSet::new(); bricks.len()];

    for (index, (low, high)) in bricks.iter().enumerate() {
        let footprint: Vec<(i32, i32)> = (low.x..=high.x)
            .flat_map(|x| (low.y..=high.y).map(move |y| (x, y)))
            .collect();
        let floor = footprint
            .iter()
            .filter_map(|column| tops.get(column))
            .map(|&(z, _)| z)
            .max()
            .unwrap_or(0);
        for column in &footprint {
            if let Some(&(z, support)) = tops.get(column)
                && z == floor
            {
                below[index].insert(support);
                above[support].insert(index);
            }
        }
        let top = floor + 1 + (high.z - low.z);
        for column in footprint {
            tops.insert(column, (top, index));
        }
    }
    Stack { below, above }
}

impl AocParser for Solver {
    type SharedData<'a> = Stack;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let bricks = lines(input)
            .map(|line| -> Result<(Point3D, Point3D), ParseError> {
                let ends = parse_points_3d::<i32>(line, "~").map_err(|e| invalid(e.to_string()))?;
                let [a, b] = ends[..] else {
                    return Err(invalid(format!("bad brick {line:?}")));
                };
                let low = Point3D::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z));
                let high = Point3D::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z));
                Ok((low, high))
            })
            .collect::<Result<_, _>>()?;
        Ok(settle(bricks))
    }
}

impl Stack {
    /// Bricks that fall when `removed` is taken out, not counting it
    fn chain_reaction(&self, removed: usize) -> usize {
        let mut fallen = HashSet::from([removed]);
        let mut queue = VecDeque::from([removed]);
        while let Some(brick) = queue.pop_front() {
            for &resting in &self.above[brick] {
                if !fallen.contains(&resting) && self.below[resting].is_subset(&fallen) {
                    fallen.insert(resting);
                    queue.push_back(resting);
                }
            }
        }
        fallen.len() - 1
    }
}

impl PartSolver<1> for Solver {
    /// A brick is safe to remove when everything on it rests on another brick too
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let safe = shared
            .above
            .iter()
            .filter(|resting| resting.iter().all(|&brick| shared.below[brick].len() > 1))
            .count();
        Ok(safe.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: usize = (0..shared.above.len())
            .map(|brick| shared.chain_reaction(brick))
            .sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        1,0,1~1,2,1
        0,0,2~2,0,2
        0,2,3~2,2,3
        0,0,4~0,2,4
        2,0,5~2,2,5
        0,1,6~2,1,6
        1,1,8~1,1,9
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "5");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "7");
    }

    #[test]
    fn test_bricks_fall_to_the_ground() {
        // Settled order: the tall brick, the lone cube, then the bar landing on the tall brick
        let input = indoc! {"
            0,0,5~0,0,6
            0,0,10~1,0,10
            3,3,7~3,3,7
        "};
        let stack = Solver::parse(input).unwrap();
        assert!(stack.below[0].is_empty());
        assert_eq!(stack.above[0], HashSet::from([2]));
        assert!(stack.below[1].is_empty());
        assert_eq!(stack.chain_reaction(0), 1);
    }
}
