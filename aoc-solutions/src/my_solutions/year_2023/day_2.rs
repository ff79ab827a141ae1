use crate::utils::parse::{invalid, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 2, tags = ["2023", "parsing"])]
pub struct Solver;

/// Cubes of each colour, either shown in one handful or needed for a game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cubes {
    red: u32,
    green: u32,
    blue: u32,
}

impl Cubes {
    fn fits_in(&self, bag: &Cubes) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    fn union(self, other: Cubes) -> Cubes {
        Cubes {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn power(&self) -> u32 {
        self.red * self.green * self.blue
    }
}

pub struct Game {
    id: u32,
    handfuls: Vec<Cubes>,
}

const BAG: Cubes = Cubes {
    red: 12,
    green: 13,
    blue: 14,
};

fn parse_handful(handful: &str) -> Result<Cubes, ParseError> {
    let mut cubes = Cubes::default();
    for shown in handful.split(',').map(str::trim) {
        let (count, colour) = shown
            .split_once(' ')
            .ok_or_else(|| invalid(format!("bad cube count {shown:?}")))?;
        let count: u32 = count
            .parse()
            .map_err(|e| invalid(format!("cube count {count:?}: {e}")))?;
        match colour {
            "red" => cubes.red += count,
            "green" => cubes.green += count,
            "blue" => cubes.blue += count,
            _ => return Err(invalid(format!("unknown colour {colour:?}"))),
        }
    }
    Ok(cubes)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Game>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input)
            .map(|line| -> Result<Game, ParseError> {
                let (label, handfuls) = line
                    .split_once(": ")
                    .ok_or_else(|| invalid(format!("bad game {line:?}")))?;
                let id = label
                    .strip_prefix("Game ")
                    .and_then(|id| id.parse().ok())
                    .ok_or_else(|| invalid(format!("bad game label {label:?}")))?;
                let handfuls = handfuls
                    .split(';')
                    .map(parse_handful)
                    .collect::<Result<_, _>>()?;
                Ok(Game { id, handfuls })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let possible: u32 = shared
            .iter()
            .filter(|game| game.handfuls.iter().all(|handful| handful.fits_in(&BAG)))
            .map(|game| game.id)
            .sum();
        Ok(possible.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let power: u32 = shared
            .iter()
            .map(|game| {
                game.handfuls
                    .iter()
                    .fold(Cubes::default(), |needed, &handful| needed.union(handful))
                    .power()
            })
            .sum();
        Ok(power.to_string())
    }
}
