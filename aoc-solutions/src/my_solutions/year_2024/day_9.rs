use crate::utils::parse::invalid;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 9, tags = ["2024", "simulation"])]
pub struct Solver;

impl AocParser for Solver {
    /// Alternating file and free-space lengths
    type SharedData<'a> = Vec<usize>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as usize)
                    .ok_or_else(|| invalid(format!("{c:?} is not a digit")))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    len: usize,
}

/// File spans (index is the file id) and free spans, both left to right
fn layout(disk_map: &[usize]) -> (Vec<Span>, Vec<Span>) {
    let mut files = Vec::new();
    let mut free = Vec::new();
    let mut offset = 0;
    for (i, &len) in disk_map.iter().enumerate() {
        let span = Span { start: offset, len };
        if i % 2 == 0 {
            files.push(span);
        } else {
            free.push(span);
        }
        offset += len;
    }
    (files, free)
}

fn checksum(files: &[Span]) -> usize {
    files
        .iter()
        .enumerate()
        .map(|(id, span)| (span.start..span.start + span.len).sum::<usize>() * id)
        .sum()
}

impl PartSolver<1> for Solver {
    /// Moves single blocks from the end into the leftmost gap
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut blocks: Vec<Option<usize>> = shared
            .iter()
            .enumerate()
            .flat_map(|(i, &len)| std::iter::repeat_n((i % 2 == 0).then_some(i / 2), len))
            .collect();

        let (mut left, mut right) = (0, blocks.len());
        while left < right {
            if blocks[left].is_some() {
                left += 1;
            } else if blocks[right - 1].is_none() {
                right -= 1;
            } else {
                blocks.swap(left, right - 1);
                left += 1;
                right -= 1;
            }
        }

        let total: usize = blocks
            .iter()
            .enumerate()
            .filter_map(|(position, id)| id.map(|id| id * position))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Moves whole files, highest id first, into the leftmost gap that fits
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (mut files, mut free) = layout(shared);
        for file in files.iter_mut().rev() {
            let Some(gap) = free
                .iter_mut()
                .take_while(|gap| gap.start < file.start)
                .find(|gap| gap.len >= file.len)
            else {
                continue;
            };
            file.start = gap.start;
            gap.start += file.len;
            gap.len -= file.len;
        }
        Ok(checksum(&files).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_example() {
        let mut shared = Solver::parse("2333133121414131402").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "1928");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "2858");
    }

    #[test]
    fn test_small_map() {
        // 0..111....22222 compacts to 022111222
        let mut shared = Solver::parse("12345").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "60");
    }
}
