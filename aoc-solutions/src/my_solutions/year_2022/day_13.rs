use crate::utils::parse::{invalid, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 13, tags = ["2022", "parsing", "recursion"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    Integer(u32),
    List(Vec<Packet>),
}

impl Ord for Packet {
    /// An integer compared with a list is treated as a one-item list
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Packet::Integer(a), Packet::Integer(b)) => a.cmp(b),
            (Packet::List(a), Packet::List(b)) => a.cmp(b),
            (Packet::Integer(a), Packet::List(b)) => [Packet::Integer(*a)][..].cmp(b),
            (Packet::List(a), Packet::Integer(b)) => a[..].cmp(&[Packet::Integer(*b)]),
        }
    }
}

impl PartialOrd for Packet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn parse_packet(chars: &mut Peekable<Chars<'_>>) -> Result<Packet, String> {
    match chars.next() {
        Some('[') => {
            let mut items = Vec::new();
            if chars.next_if_eq(&']').is_some() {
                return Ok(Packet::List(items));
            }
            loop {
                items.push(parse_packet(chars)?);
                match chars.next() {
                    Some(',') => continue,
                    Some(']') => return Ok(Packet::List(items)),
                    other => return Err(format!("expected ',' or ']', found {other:?}")),
                }
            }
        }
        Some(c) if c.is_ascii_digit() => {
            let mut value = c.to_digit(10).unwrap_or(0);
            while let Some(digit) = chars.next_if(char::is_ascii_digit) {
                value = value * 10 + digit.to_digit(10).unwrap_or(0);
            }
            Ok(Packet::Integer(value))
        }
        other => Err(format!("expected a packet, found {other:?}")),
    }
}

impl std::str::FromStr for Packet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars().peekable();
        let packet = parse_packet(&mut chars)?;
        match chars.next() {
            None => Ok(packet),
            Some(c) => Err(format!("trailing {c:?}")),
        }
    }
}

fn divider(value: u32) -> Packet {
    Packet::List(vec![Packet::List(vec![Packet::Integer(value)])])
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Packet>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let packets: Vec<Packet> = lines(input)
            .map(|line| line.parse().map_err(|e| invalid(format!("{line:?}: {e}"))))
            .collect::<Result<_, _>>()?;
        if packets.len() % 2 != 0 {
            return Err(invalid("packets do not come in pairs"));
        }
        Ok(packets)
    }
}

impl PartSolver<1> for Solver {
    /// Sum of the 1-based indices of the pairs already in order
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: usize = shared
            .chunks_exact(2)
            .enumerate()
            .filter(|(_, pair)| pair[0] < pair[1])
            .map(|(index, _)| index + 1)
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Product of the divider packets' positions once everything is sorted.
    /// A divider's position is one plus the number of packets below it.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (first, second) = (divider(2), divider(6));
        let below = |d: &Packet| shared.iter().filter(|packet| *packet < d).count();
        let key = (below(&first) + 1) * (below(&second) + 2);
        Ok(key.to_string())
    }
}
