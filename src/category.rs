use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InputError, TrackerError};

pub const CATEGORY_COUNT: usize = 13;
pub const UPPER_BONUS_THRESHOLD: i32 = 63;
pub const UPPER_BONUS: i32 = 35;
pub const FULL_HOUSE_SCORE: i32 = 25;
pub const SMALL_STRAIGHT_SCORE: i32 = 30;
pub const LARGE_STRAIGHT_SCORE: i32 = 40;
pub const YAHTZEE_SCORE: i32 = 50;
pub const YAHTZEE_BONUS_POINTS: i32 = 100;
pub const MAX_YAHTZEE_BONUSES: u8 = 3;
pub const CHANCE_MIN: i32 = 5;
pub const CHANCE_MAX: i32 = 30;
pub const DEFAULT_KIND_MAX: i32 = 24;
pub const BONUS_LABEL: &str = "YAHTZEE BONUS";

const DICE: i32 = 5;
const MAX_FACE: i32 = 6;

/// One of the thirteen boxes on a Yahtzee scorecard, in scorecard order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Aces,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

/// Half of the scorecard a category belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Section {
    Upper,
    Lower,
}

impl Category {
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Aces,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    /// Position of the category on the scorecard.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn section(self) -> Section {
        if self.face().is_some() {
            Section::Upper
        } else {
            Section::Lower
        }
    }

    /// Die face counted by an upper-section category.
    #[inline]
    pub fn face(self) -> Option<i32> {
        match self {
            Category::Aces => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    pub fn upper() -> impl Iterator<Item = Category> {
        Self::ALL.into_iter().filter(|c| c.section() == Section::Upper)
    }

    pub fn lower() -> impl Iterator<Item = Category> {
        Self::ALL.into_iter().filter(|c| c.section() == Section::Lower)
    }

    /// Label printed on the scorecard.
    pub fn label(self) -> &'static str {
        match self {
            Category::Aces => "Aces",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfAKind => "3 of a Kind",
            Category::FourOfAKind => "4 of a Kind",
            Category::FullHouse => "Full House",
            Category::SmallStraight => "SM Straight",
            Category::LargeStraight => "LG Straight",
            Category::Yahtzee => "YAHTZEE",
            Category::Chance => "Chance",
        }
    }

    /// How to score the box, as printed next to the label.
    pub fn description(self) -> &'static str {
        match self {
            Category::Aces => "Count and add only Aces",
            Category::Twos => "Count and add only Twos",
            Category::Threes => "Count and add only Threes",
            Category::Fours => "Count and add only Fours",
            Category::Fives => "Count and add only Fives",
            Category::Sixes => "Count and add only Sixes",
            Category::ThreeOfAKind | Category::FourOfAKind => "Add total of all dice",
            Category::FullHouse => "Score 25",
            Category::SmallStraight => "Score 30",
            Category::LargeStraight => "Score 40",
            Category::Yahtzee => "Score 50",
            Category::Chance => "Score total of all dice",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = InputError;

    /// Accepts scorecard labels case-insensitively, ignoring spaces, dashes and
    /// underscores, plus a few common shorthands (`ones`, `3k`, `sm`, ...).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        let category = match key.as_str() {
            "aces" | "ace" | "ones" | "1s" => Category::Aces,
            "twos" | "2s" => Category::Twos,
            "threes" | "3s" => Category::Threes,
            "fours" | "4s" => Category::Fours,
            "fives" | "5s" => Category::Fives,
            "sixes" | "6s" => Category::Sixes,
            "3ofakind" | "threeofakind" | "3k" => Category::ThreeOfAKind,
            "4ofakind" | "fourofakind" | "4k" => Category::FourOfAKind,
            "fullhouse" | "fh" => Category::FullHouse,
            "smstraight" | "smallstraight" | "sm" => Category::SmallStraight,
            "lgstraight" | "largestraight" | "lg" => Category::LargeStraight,
            "yahtzee" => Category::Yahtzee,
            "chance" => Category::Chance,
            _ => return Err(InputError::UnknownCategory(raw.trim().to_string())),
        };
        Ok(category)
    }
}

/// Tunable parameters of the scoring rule table.
///
/// Only the ceiling of the two "of a kind" boxes varies between printed rule
/// sheets, so it is the only knob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    kind_max: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            kind_max: DEFAULT_KIND_MAX,
        }
    }
}

impl Rules {
    pub fn with_kind_max(kind_max: i32) -> Result<Self, TrackerError> {
        if !(0..=DICE * MAX_FACE).contains(&kind_max) {
            return Err(TrackerError::InvalidConfiguration(
                "kind maximum must be between 0 and 30",
            ));
        }
        Ok(Self { kind_max })
    }

    pub fn kind_max(&self) -> i32 {
        self.kind_max
    }

    /// Whether `score` is arithmetically possible for `category`.
    pub fn is_legal(&self, category: Category, score: i32) -> bool {
        if let Some(face) = category.face() {
            return (0..=DICE * face).contains(&score) && score % face == 0;
        }
        match category {
            Category::ThreeOfAKind | Category::FourOfAKind => (0..=self.kind_max).contains(&score),
            Category::FullHouse => score == FULL_HOUSE_SCORE,
            Category::SmallStraight => score == SMALL_STRAIGHT_SCORE,
            Category::LargeStraight => score == LARGE_STRAIGHT_SCORE,
            Category::Yahtzee => score == 0 || score == YAHTZEE_SCORE,
            Category::Chance => (CHANCE_MIN..=CHANCE_MAX).contains(&score),
            _ => false,
        }
    }

    /// Every legal score for `category`, ascending.
    pub fn legal_scores(&self, category: Category) -> Vec<i32> {
        let ceiling = match category.face() {
            Some(face) => DICE * face,
            None => YAHTZEE_SCORE,
        };
        (0..=ceiling)
            .filter(|score| self.is_legal(category, *score))
            .collect()
    }
}
