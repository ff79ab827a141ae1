//! `AutoRegisterSolver` together with `AocSolver` and manual registration

use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

fn parse_numbers(input: &str) -> Result<Vec<i32>, ParseError> {
    input
        .lines()
        .map(|line| {
            line.trim()
                .parse::<i32>()
                .map_err(|_| ParseError::InvalidFormat("Expected integer".into()))
        })
        .collect()
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2033, day = 24, tags = ["test", "combined"])]
struct CombinedMacroSolver;

impl AocParser for CombinedMacroSolver {
    type SharedData<'a> = Vec<i32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_numbers(input)
    }
}

impl PartSolver<1> for CombinedMacroSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i32>().to_string())
    }
}

impl PartSolver<2> for CombinedMacroSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i32>().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2033, day = 25)]
struct SinglePartSolver;

impl AocParser for SinglePartSolver {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for SinglePartSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

/// Derives only `AocSolver`; registered by hand below
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct ManualSolver;

impl AocParser for ManualSolver {
    type SharedData<'a> = Vec<i32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_numbers(input)
    }
}

impl PartSolver<1> for ManualSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().max().copied().unwrap_or_default().to_string())
    }
}

impl PartSolver<2> for ManualSolver {
    fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Err(SolveError::PartNotImplemented(2))
    }
}

#[test]
fn test_combined_solver_auto_registers() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .expect("Failed to register plugins")
        .build();

    let mut solver = registry
        .create_solver(2033, 24, "5\n6\n7")
        .expect("Failed to create solver - was it registered?");

    assert_eq!(solver.solve(1).unwrap().answer, "18");
    assert_eq!(solver.solve(2).unwrap().answer, "210");
    assert_eq!(registry.get_info(2033, 25).map(|i| i.parts), Some(1));
}

#[test]
fn test_tag_filter_selects_plugins() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"combined"))
        .unwrap()
        .build();

    assert!(registry.contains(2033, 24));
    assert!(!registry.contains(2033, 25));
}

#[test]
fn test_manual_registration() {
    let registry = SolverRegistryBuilder::new()
        .register::<ManualSolver>(2033, 1)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2033, 1, "2\n9\n4").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "9");
    assert!(matches!(solver.solve(2), Err(SolveError::PartNotImplemented(2))));
}
