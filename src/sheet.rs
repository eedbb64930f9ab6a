//! Per-player scorecard for a single game.
//!
//! Totals follow the printed scorecard:
//!   upper total  = Aces..Sixes
//!   upper bonus  = 35 once the upper total reaches 63
//!   lower total  = 3 of a Kind..Chance + 100 per Yahtzee bonus
//!   grand total  = upper total + upper bonus + lower total
//! The recorded total (what a game summary stores) leaves the upper bonus out.

use serde::{Deserialize, Serialize};

use crate::category::{
    CATEGORY_COUNT, Category, MAX_YAHTZEE_BONUSES, Section, UPPER_BONUS, UPPER_BONUS_THRESHOLD,
    YAHTZEE_BONUS_POINTS,
};
use crate::error::Rejection;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    entries: [Option<i32>; CATEGORY_COUNT],
    yahtzee_bonus: u8,
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, category: Category) -> Option<i32> {
        self.entries[category.index()]
    }

    #[inline]
    pub fn is_filled(&self, category: Category) -> bool {
        self.get(category).is_some()
    }

    pub fn set(&mut self, category: Category, score: i32) {
        self.entries[category.index()] = Some(score);
    }

    pub fn filled_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled_count() == CATEGORY_COUNT
    }

    pub fn open_categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(|category| !self.is_filled(*category))
    }

    pub fn yahtzee_bonus(&self) -> u8 {
        self.yahtzee_bonus
    }

    /// Adds one Yahtzee bonus and returns the new count.
    pub fn add_yahtzee_bonus(&mut self) -> Result<u8, Rejection> {
        if self.yahtzee_bonus >= MAX_YAHTZEE_BONUSES {
            return Err(Rejection::BonusLimitReached);
        }
        self.yahtzee_bonus += 1;
        Ok(self.yahtzee_bonus)
    }

    pub fn bonus_points(&self) -> i64 {
        i64::from(self.yahtzee_bonus) * i64::from(YAHTZEE_BONUS_POINTS)
    }

    pub fn upper_total(&self) -> i64 {
        self.section_total(Section::Upper)
    }

    pub fn upper_bonus(&self) -> i64 {
        if self.upper_total() >= i64::from(UPPER_BONUS_THRESHOLD) {
            i64::from(UPPER_BONUS)
        } else {
            0
        }
    }

    pub fn lower_total(&self) -> i64 {
        self.section_total(Section::Lower) + self.bonus_points()
    }

    pub fn grand_total(&self) -> i64 {
        self.upper_total() + self.upper_bonus() + self.lower_total()
    }

    /// Sum of every recorded box plus Yahtzee bonus points. Empty boxes count 0.
    pub fn recorded_total(&self) -> i64 {
        self.entries.iter().flatten().copied().map(i64::from).sum::<i64>() + self.bonus_points()
    }

    // Entries are summed as i64 so a lenient sheet full of i32::MAX cannot overflow.
    fn section_total(&self, section: Section) -> i64 {
        Category::ALL
            .into_iter()
            .filter(|category| category.section() == section)
            .filter_map(|category| self.get(category))
            .map(i64::from)
            .sum()
    }
}
