use crate::utils::matrix::Matrix;
use crate::utils::parse::invalid;
use crate::utils::point::Point;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 3, tags = ["2023", "grid"])]
pub struct Solver;

/// A number on the schematic with the symbols around it
struct PartNumber {
    value: u32,
    symbols: HashSet<Point>,
}

pub struct Schematic {
    grid: Matrix<char>,
    numbers: Vec<PartNumber>,
}

fn is_symbol(c: char) -> bool {
    c != '.' && !c.is_ascii_digit()
}

impl AocParser for Solver {
    type SharedData<'a> = Schematic;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Matrix::parse_chars(input).map_err(|e| invalid(e.to_string()))?;
        let mut numbers = Vec::new();

        for (y, row) in grid.rows().enumerate() {
            let mut x = 0;
            while x < row.len() {
                if !row[x].is_ascii_digit() {
                    x += 1;
                    continue;
                }
                let start = x;
                let mut value = 0u32;
                while let Some(digit) = row.get(x).and_then(|c| c.to_digit(10)) {
                    value = value
                        .checked_mul(10)
                        .and_then(|value| value.checked_add(digit))
                        .ok_or_else(|| invalid(format!("number at ({start}, {y}) overflows")))?;
                    x += 1;
                }
                let symbols = (start..x)
                    .flat_map(|x| Point::new(x as i32, y as i32).all_neighbors())
                    .filter(|&p| grid.get(p).is_some_and(|&c| is_symbol(c)))
                    .collect();
                numbers.push(PartNumber { value, symbols });
            }
        }

        Ok(Schematic { grid, numbers })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .numbers
            .iter()
            .filter(|number| !number.symbols.is_empty())
            .map(|number| number.value)
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// A gear is a `*` next to exactly two numbers
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut around_stars: HashMap<Point, Vec<u32>> = HashMap::new();
        for number in &shared.numbers {
            for &symbol in &number.symbols {
                if shared.grid[symbol] == '*' {
                    around_stars.entry(symbol).or_default().push(number.value);
                }
            }
        }
        let ratios: u64 = around_stars
            .values()
            .filter_map(|values| match values[..] {
                [a, b] => Some(u64::from(a) * u64::from(b)),
                _ => None,
            })
            .sum();
        Ok(ratios.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        467..114..
        ...*......
        ..35..633.
        ......#...
        617*......
        .....+.58.
        ..592.....
        ......755.
        ...$.*....
        .664.598..
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.numbers.len(), 10);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "4361");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "467835");
    }

    #[test]
    fn test_number_at_row_end() {
        let input = indoc! {"
            ..12
            .*..
            ..34
        "};
        let mut shared = Solver::parse(input).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "46");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "408");
    }
}
