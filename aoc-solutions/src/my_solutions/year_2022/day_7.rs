use crate::utils::parse::{invalid, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 7, tags = ["2022", "tree", "parsing"])]
pub struct Solver;

const SMALL_DIRECTORY: u64 = 100_000;
const DISK_SIZE: u64 = 70_000_000;
const SPACE_NEEDED: u64 = 30_000_000;

/// Total size of every directory, the root last
pub struct DirectorySizes(Vec<u64>);

impl AocParser for Solver {
    type SharedData<'a> = DirectorySizes;

    /// Replays the terminal session with a stack of the open directories'
    /// running totals; leaving a directory adds its total to the parent
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut open: Vec<u64> = vec![0];
        let mut closed = Vec::new();
        let mut leave = |open: &mut Vec<u64>| {
            if let Some(size) = open.pop() {
                closed.push(size);
                if let Some(parent) = open.last_mut() {
                    *parent += size;
                }
            }
        };

        for line in lines(input) {
            let words: Vec<&str> = line.split_whitespace().collect();
            match words[..] {
                ["$", "cd", "/"] => {
                    while open.len() > 1 {
                        leave(&mut open);
                    }
                }
                ["$", "cd", ".."] => {
                    if open.len() == 1 {
                        return Err(invalid("cd .. from the root directory"));
                    }
                    leave(&mut open);
                }
                ["$", "cd", _] => open.push(0),
                ["$", "ls"] | ["dir", _] => {}
                [size, _] => {
                    let size: u64 = size
                        .parse()
                        .map_err(|e| invalid(format!("file size in {line:?}: {e}")))?;
                    if let Some(current) = open.last_mut() {
                        *current += size;
                    }
                }
                _ => return Err(invalid(format!("unknown terminal line {line:?}"))),
            }
        }

        while !open.is_empty() {
            leave(&mut open);
        }
        Ok(DirectorySizes(closed))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.0.iter().filter(|&&size| size <= SMALL_DIRECTORY).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Smallest directory whose deletion leaves enough free space
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let used = shared.0.last().copied().unwrap_or(0);
        let to_free = (used + SPACE_NEEDED).saturating_sub(DISK_SIZE);
        shared
            .0
            .iter()
            .filter(|&&size| size >= to_free)
            .min()
            .map(u64::to_string)
            .ok_or_else(|| SolveError::failed("no directory frees enough space"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        $ cd /
        $ ls
        dir a
        14848514 b.txt
        8504156 c.dat
        dir d
        $ cd a
        $ ls
        dir e
        29116 f
        2557 g
        62596 h.lst
        $ cd e
        $ ls
        584 i
        $ cd ..
        $ cd ..
        $ cd d
        $ ls
        4060174 j
        8033020 d.log
        5626152 d.ext
        7214296 k
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.0.last(), Some(&48381165));
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "95437");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "24933642");
    }

    #[test]
    fn test_cd_root_unwinds() {
        let input = indoc! {"
            $ cd /
            $ cd a
            $ cd b
            10 x
            $ cd /
            5 y
        "};
        let shared = Solver::parse(input).unwrap();
        assert_eq!(shared.0, vec![10, 10, 15]);
    }

    #[test]
    fn test_rejects_leaving_root() {
        assert!(Solver::parse("$ cd /\n$ cd ..\n").is_err());
    }
}
