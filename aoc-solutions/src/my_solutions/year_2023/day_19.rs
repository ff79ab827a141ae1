use crate::utils::parse::{blocks, invalid, lines, missing};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 19, tags = ["2023", "intervals", "parsing"])]
pub struct Solver;

const RATINGS: &str = "xmas";

/// A part's four ratings, in `xmas` order
type Part = [u64; 4];

/// Half-open rating ranges for every category
type PartRange = [(u64, u64); 4];

#[derive(Debug, Clone, Copy)]
enum Condition {
    Less(usize, u64),
    Greater(usize, u64),
    Always,
}

#[derive(Debug, Clone, Copy)]
struct Rule<'a> {
    condition: Condition,
    target: &'a str,
}

impl Condition {
    fn accepts(self, part: &Part) -> bool {
        match self {
            Condition::Less(rating, value) => part[rating] < value,
            Condition::Greater(rating, value) => part[rating] > value,
            Condition::Always => true,
        }
    }

    /// Splits `range` into the part this condition accepts and the rest;
    /// either side is `None` when empty
    fn split(self, range: PartRange) -> (Option<PartRange>, Option<PartRange>) {
        let (rating, boundary, accepted_below) = match self {
            Condition::Less(rating, value) => (rating, value, true),
            Condition::Greater(rating, value) => (rating, value + 1, false),
            Condition::Always => return (Some(range), None),
        };
        let (start, end) = range[rating];
        let boundary = boundary.clamp(start, end);
        let part = |low: u64, high: u64| {
            (low < high).then(|| {
                let mut part = range;
                part[rating] = (low, high);
                part
            })
        };
        let (below, above) = (part(start, boundary), part(boundary, end));
        if accepted_below {
            (below, above)
        } else {
            (above, below)
        }
    }
}

pub struct System<'a> {
    workflows: HashMap<&'a str, Vec<Rule<'a>>>,
    parts: Vec<Part>,
}

fn workflow_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\w+)\{(.*)\}$").unwrap())
}

fn part_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\{x=(\d+),m=(\d+),a=(\d+),s=(\d+)\}$").unwrap())
}

fn parse_rule(rule: &str) -> Result<Rule<'_>, ParseError> {
    let Some((condition, target)) = rule.split_once(':') else {
        return Ok(Rule {
            condition: Condition::Always,
            target: rule,
        });
    };
    let mut chars = condition.chars();
    let rating = chars
        .next()
        .and_then(|c| RATINGS.find(c))
        .ok_or_else(|| invalid(format!("unknown rating in {rule:?}")))?;
    let comparison = chars.next();
    let value = chars
        .as_str()
        .parse()
        .map_err(|e| invalid(format!("rule {rule:?}: {e}")))?;
    let condition = match comparison {
        Some('<') => Condition::Less(rating, value),
        Some('>') => Condition::Greater(rating, value),
        _ => return Err(invalid(format!("unknown comparison in {rule:?}"))),
    };
    Ok(Rule { condition, target })
}

impl AocParser for Solver {
    type SharedData<'a> = System<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let [workflows, parts] = blocks(input)[..] else {
            return Err(invalid("expected workflows and parts separated by a blank line"));
        };

        let workflows = lines(workflows)
            .map(|line| -> Result<(&'a str, Vec<Rule<'a>>), ParseError> {
                let captures = workflow_regex()
                    .captures(line)
                    .ok_or_else(|| invalid(format!("bad workflow {line:?}")))?;
                let (_, [name, rules]) = captures.extract();
                let rules = rules.split(',').map(parse_rule).collect::<Result<_, _>>()?;
                Ok((name, rules))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;
        if !workflows.contains_key("in") {
            return Err(missing("no workflow named in"));
        }

        let parts = lines(parts)
            .map(|line| -> Result<Part, ParseError> {
                let captures = part_regex()
                    .captures(line)
                    .ok_or_else(|| invalid(format!("bad part {line:?}")))?;
                let (_, ratings) = captures.extract::<4>();
                let mut part = [0; 4];
                for (slot, rating) in part.iter_mut().zip(ratings) {
                    *slot = rating
                        .parse()
                        .map_err(|e| invalid(format!("rating {rating:?}: {e}")))?;
                }
                Ok(part)
            })
            .collect::<Result<_, _>>()?;

        Ok(System { workflows, parts })
    }
}

impl<'a> System<'a> {
    fn rules(&self, workflow: &str) -> Result<&[Rule<'a>], SolveError> {
        self.workflows
            .get(workflow)
            .map(Vec::as_slice)
            .ok_or_else(|| SolveError::failed(format!("no workflow named {workflow}")))
    }

    fn is_accepted(&self, part: &Part) -> Result<bool, SolveError> {
        let mut workflow = "in";
        // A workflow seen twice means the part loops forever
        for _ in 0..=self.workflows.len() {
            let rule = self
                .rules(workflow)?
                .iter()
                .find(|rule| rule.condition.accepts(part))
                .ok_or_else(|| SolveError::failed(format!("workflow {workflow} has no fallback")))?;
            match rule.target {
                "A" => return Ok(true),
                "R" => return Ok(false),
                next => workflow = next,
            }
        }
        Err(SolveError::failed(format!("part {part:?} never leaves the workflows")))
    }

    /// Rating combinations within `range` that end up accepted
    fn accepted_combinations(
        &self,
        workflow: &str,
        range: PartRange,
        depth: usize,
    ) -> Result<u64, SolveError> {
        match workflow {
            "A" => return Ok(range.iter().map(|(start, end)| end - start).product()),
            "R" => return Ok(0),
            _ if depth > self.workflows.len() => {
                return Err(SolveError::failed("the workflows loop"));
            }
            _ => {}
        }

        let mut accepted = 0;
        let mut remaining = Some(range);
        for rule in self.rules(workflow)? {
            let Some(range) = remaining else { break };
            let (matched, rest) = rule.condition.split(range);
            if let Some(matched) = matched {
                accepted += self.accepted_combinations(rule.target, matched, depth + 1)?;
            }
            remaining = rest;
        }
        Ok(accepted)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0;
        for part in &shared.parts {
            if shared.is_accepted(part)? {
                total += part.iter().sum::<u64>();
            }
        }
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Every rating ranges over 1 to 4000
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let combinations = shared.accepted_combinations("in", [(1, 4001); 4], 0)?;
        Ok(combinations.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        px{a<2006:qkq,m>2090:A,rfg}
        pv{a>1716:R,A}
        lnx{m>1548:A,A}
        rfg{s<537:gd,x>2440:R,A}
        qs{s>3448:A,lnx}
        qkq{x<1416:A,crn}
        crn{x>2662:A,R}
        in{s<1351:px,qqz}
        qqz{s>2770:qs,m<1801:hdj,R}
        gd{a>3333:R,R}
        hdj{m>838:A,pv}

        {x=787,m=2655,a=1222,s=2876}
        {x=1679,m=44,a=2067,s=496}
        {x=2036,m=264,a=79,s=2244}
        {x=2461,m=1339,a=466,s=291}
        {x=2127,m=1623,a=2188,s=1013}
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "19114");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "167409079868000");
    }

    #[test]
    fn test_split_at_boundary() {
        let range = [(1, 11); 4];
        let (matched, rest) = Condition::Greater(0, 4).split(range);
        assert_eq!(matched.unwrap()[0], (5, 11));
        assert_eq!(rest.unwrap()[0], (1, 5));
        let (matched, rest) = Condition::Less(1, 1).split(range);
        assert!(matched.is_none());
        assert_eq!(rest, Some(range));
    }

    #[test]
    fn test_looping_workflows() {
        let input = indoc! {"
            in{x>10:A,loop}
            loop{in}

            {x=1,m=2,a=3,s=4}
        "};
        let mut shared = Solver::parse(input).unwrap();
        assert!(Solver::solve_part(&mut shared, 1).is_err());
        assert!(Solver::solve_part(&mut shared, 2).is_err());
    }
}
