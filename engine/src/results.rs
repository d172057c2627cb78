//! Result entry on a document's fixture list.

use crate::Match;
use rand::Rng;

/// Highest score produced by [`randomize_results`].
pub const MAX_RANDOM_GOALS: u32 = 6;

/// Largest goal count a match side can hold. Larger input is clamped.
pub const MAX_GOALS: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Read typed goal input. Leading digits count (`"3 "` and `"3x"` are 3),
/// negatives clamp to zero, values above [`MAX_GOALS`] clamp to it, and
/// anything without digits is unplayed.
pub fn parse_goals(text: &str) -> Option<u32> {
    let text = text.trim();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits: &str = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    if digits.is_empty() {
        return None;
    }
    if negative {
        return Some(0);
    }
    Some(digits.parse::<u32>().map_or(MAX_GOALS, |n| n.min(MAX_GOALS)))
}

/// Set one side's goals. Returns false when no match has `match_id`.
pub fn record_goals(matches: &mut [Match], match_id: &str, side: Side, goals: Option<u32>) -> bool {
    let Some(m) = matches.iter_mut().find(|m| m.id == match_id) else {
        return false;
    };
    match side {
        Side::A => m.goals_a = goals,
        Side::B => m.goals_b = goals,
    }
    true
}

pub fn goals(m: &Match, side: Side) -> Option<u32> {
    match side {
        Side::A => m.goals_a,
        Side::B => m.goals_b,
    }
}

pub fn reset_results(matches: &mut [Match]) {
    for m in matches {
        m.goals_a = None;
        m.goals_b = None;
    }
}

/// Give every match a uniform score in `0..=6` on each side.
pub fn randomize_results<R: Rng + ?Sized>(matches: &mut [Match], rng: &mut R) {
    for m in matches {
        m.goals_a = Some(rng.gen_range(0..=MAX_RANDOM_GOALS));
        m.goals_b = Some(rng.gen_range(0..=MAX_RANDOM_GOALS));
    }
}
