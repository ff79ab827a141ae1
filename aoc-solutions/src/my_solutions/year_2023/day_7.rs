use crate::utils::parse::{invalid, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 7, tags = ["2023", "sorting"])]
pub struct Solver;

const CARDS: &str = "23456789TJQKA";
const CARDS_WITH_JOKERS: &str = "J23456789TQKA";

/// Hand types from weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

pub struct Hand<'a> {
    cards: &'a str,
    bid: u64,
}

impl Hand<'_> {
    /// Jokers join whichever group is already largest
    fn hand_type(&self, jokers: bool) -> HandType {
        let joker_count = if jokers {
            self.cards.chars().filter(|&c| c == 'J').count()
        } else {
            0
        };
        let mut groups = self
            .cards
            .chars()
            .filter(|&c| !jokers || c != 'J')
            .counts()
            .into_values()
            .sorted_unstable_by(|a, b| b.cmp(a))
            .collect_vec();
        match groups.first_mut() {
            Some(largest) => *largest += joker_count,
            None => groups.push(joker_count),
        }

        match groups[..] {
            [5] => HandType::FiveOfAKind,
            [4, ..] => HandType::FourOfAKind,
            [3, 2] => HandType::FullHouse,
            [3, ..] => HandType::ThreeOfAKind,
            [2, 2, ..] => HandType::TwoPair,
            [2, ..] => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }

    fn strength(&self, jokers: bool) -> (HandType, Vec<usize>) {
        let order = if jokers { CARDS_WITH_JOKERS } else { CARDS };
        let ranks = self
            .cards
            .chars()
            .filter_map(|c| order.find(c))
            .collect();
        (self.hand_type(jokers), ranks)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hand<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input)
            .map(|line| -> Result<Hand<'a>, ParseError> {
                let (cards, bid) = line
                    .split_once(' ')
                    .ok_or_else(|| invalid(format!("bad hand {line:?}")))?;
                if cards.chars().count() != 5 || !cards.chars().all(|c| CARDS.contains(c)) {
                    return Err(invalid(format!("bad cards {cards:?}")));
                }
                let bid = bid
                    .trim()
                    .parse()
                    .map_err(|e| invalid(format!("bid {bid:?}: {e}")))?;
                Ok(Hand { cards, bid })
            })
            .collect()
    }
}

fn winnings(hands: &[Hand], jokers: bool) -> u64 {
    hands
        .iter()
        .map(|hand| (hand.strength(jokers), hand.bid))
        .sorted_unstable()
        .zip(1..)
        .map(|((_, bid), rank)| bid * rank)
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(winnings(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(winnings(shared, true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        32T3K 765
        T55J5 684
        KK677 28
        KTJJT 220
        QQQJA 483
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "6440");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "5905");
    }

    #[test]
    fn test_hand_types() {
        let hand = |cards| Hand { cards, bid: 0 };
        assert_eq!(hand("JJJJJ").hand_type(true), HandType::FiveOfAKind);
        assert_eq!(hand("JJJJJ").hand_type(false), HandType::FiveOfAKind);
        assert_eq!(hand("2J3J4").hand_type(true), HandType::ThreeOfAKind);
        assert_eq!(hand("22J33").hand_type(true), HandType::FullHouse);
        assert_eq!(hand("22J33").hand_type(false), HandType::TwoPair);
        assert_eq!(hand("23456").hand_type(true), HandType::HighCard);
    }
}
