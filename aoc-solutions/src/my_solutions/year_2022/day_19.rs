use crate::utils::parse::{fixed_numbers, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 19, tags = ["2022", "search", "branch-and-bound"])]
pub struct Solver;

const ORE: usize = 0;
const CLAY: usize = 1;
const OBSIDIAN: usize = 2;
const GEODE: usize = 3;

/// One count per resource, indexed by the resource constants
type Resources = [u32; 4];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    id: u32,
    /// `costs[robot][resource]`
    costs: [Resources; 4],
    /// Most of each resource any robot needs; more robots than this for a
    /// resource can never be spent
    max_useful: Resources,
}

impl Blueprint {
    fn new([id, ore, clay, obsidian_ore, obsidian_clay, geode_ore, geode_obsidian]: [u32; 7]) -> Self {
        let costs = [
            [ore, 0, 0, 0],
            [clay, 0, 0, 0],
            [obsidian_ore, obsidian_clay, 0, 0],
            [geode_ore, 0, geode_obsidian, 0],
        ];
        let mut max_useful = [u32::MAX; 4];
        for resource in [ORE, CLAY, OBSIDIAN] {
            max_useful[resource] = costs.iter().map(|cost| cost[resource]).max().unwrap_or(0);
        }
        Self {
            id,
            costs,
            max_useful,
        }
    }

    fn max_geodes(&self, minutes: u32) -> u32 {
        let mut best = 0;
        self.explore(minutes, [1, 0, 0, 0], [0; 4], &mut best);
        best
    }

    /// Depth-first over which robot to build next, waiting as long as needed
    /// to afford it
    fn explore(&self, time_left: u32, robots: Resources, stock: Resources, best: &mut u32) {
        let idle = stock[GEODE] + robots[GEODE] * time_left;
        *best = (*best).max(idle);
        // A new geode robot every remaining minute is the upper bound
        if idle + time_left * time_left.saturating_sub(1) / 2 <= *best {
            return;
        }

        for robot in [GEODE, OBSIDIAN, CLAY, ORE] {
            if robots[robot] >= self.max_useful[robot] {
                continue;
            }
            let Some(wait) = self.wait_for(robot, &robots, &stock) else {
                continue;
            };
            if wait >= time_left {
                continue;
            }
            let spent = wait + 1;
            let mut next_stock = stock;
            for resource in 0..4 {
                next_stock[resource] += robots[resource] * spent;
                next_stock[resource] -= self.costs[robot][resource];
            }
            let mut next_robots = robots;
            next_robots[robot] += 1;
            self.explore(time_left - spent, next_robots, next_stock, best);
        }
    }

    /// Minutes of mining before `robot` is affordable, `None` when a needed
    /// resource has no robot mining it
    fn wait_for(&self, robot: usize, robots: &Resources, stock: &Resources) -> Option<u32> {
        (0..4)
            .map(|resource| {
                let missing = self.costs[robot][resource].saturating_sub(stock[resource]);
                match (missing, robots[resource]) {
                    (0, _) => Some(0),
                    (_, 0) => None,
                    (missing, miners) => Some(missing.div_ceil(miners)),
                }
            })
            .try_fold(0, |longest, wait| Some(longest.max(wait?)))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Blueprint>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input)
            .map(|line| fixed_numbers::<u32, 7>(line).map(Blueprint::new))
            .collect()
    }
}

impl PartSolver<1> for Solver {
    /// Sum of each blueprint's id times its geodes in 24 minutes
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let quality: u32 = shared.iter().map(|b| b.id * b.max_geodes(24)).sum();
        Ok(quality.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product: u32 = shared.iter().take(3).map(|b| b.max_geodes(32)).product();
        Ok(product.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Blueprint 1: Each ore robot costs 4 ore. Each clay robot costs 2 ore. Each obsidian robot costs 3 ore and 14 clay. Each geode robot costs 2 ore and 7 obsidian.
        Blueprint 2: Each ore robot costs 2 ore. Each clay robot costs 3 ore. Each obsidian robot costs 3 ore and 8 clay. Each geode robot costs 3 ore and 12 obsidian.
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared[0].max_geodes(24), 9);
        assert_eq!(shared[1].max_geodes(24), 12);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "33");
    }

    #[test]
    fn test_longer_run() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), (56 * 62).to_string());
    }

    #[test]
    fn test_wait_for() {
        let blueprint = Solver::parse(EXAMPLE).unwrap().remove(0);
        // Clay robot costs 2 ore with one ore robot and nothing stocked
        assert_eq!(blueprint.wait_for(CLAY, &[1, 0, 0, 0], &[0; 4]), Some(2));
        assert_eq!(blueprint.wait_for(OBSIDIAN, &[1, 0, 0, 0], &[0; 4]), None);
        assert_eq!(blueprint.wait_for(ORE, &[1, 0, 0, 0], &[5, 0, 0, 0]), Some(0));
    }
}
