//! Knockout seeding: group winners are seeded, the remaining qualifiers are
//! picked by a quota that depends on how many groups were played.

use crate::ranking::compare_rows;
use crate::{StandingRow, TournamentDocument};

/// Finishing positions that take part in seeding.
pub const PLACES: usize = 4;

/// The first four finishers of one group. Groups smaller than four leave
/// the trailing places empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPlacings {
    pub group: String,
    pub places: [Option<StandingRow>; PLACES],
}

impl GroupPlacings {
    pub fn from_table(group: impl Into<String>, table: &[StandingRow]) -> Self {
        Self {
            group: group.into(),
            places: std::array::from_fn(|i| table.get(i).cloned()),
        }
    }

    pub fn place(&self, index: usize) -> Option<&StandingRow> {
        self.places.get(index).and_then(Option::as_ref)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedingDraw {
    pub seeded: Vec<StandingRow>,
    pub non_seeded: Vec<StandingRow>,
}

/// How many teams of one finishing position join the non-seeded pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Take {
    None,
    All,
    Best(usize),
}

impl Take {
    fn select(self, mut rows: Vec<StandingRow>) -> Vec<StandingRow> {
        match self {
            Take::None => Vec::new(),
            Take::All => rows,
            Take::Best(count) => {
                rows.sort_by(compare_rows);
                rows.truncate(count);
                rows
            }
        }
    }
}

/// Non-seeded pool composition: runners-up, thirds, fourths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolQuota {
    pub seconds: Take,
    pub thirds: Take,
    pub fourths: Take,
}

impl PoolQuota {
    const fn new(seconds: Take, thirds: Take, fourths: Take) -> Self {
        Self {
            seconds,
            thirds,
            fourths,
        }
    }

    pub fn for_group_count(groups: usize) -> Self {
        use Take::{All, Best, None};
        match groups {
            0..=3 => Self::new(None, None, None),
            4 | 8 => Self::new(All, None, None),
            5 => Self::new(All, All, Best(1)),
            6 => Self::new(All, Best(4), None),
            7 => Self::new(All, Best(2), None),
            9 => Self::new(All, All, Best(5)),
            10 => Self::new(All, All, Best(2)),
            11 => Self::new(All, Best(10), None),
            _ => Self::new(All, Best(8), None),
        }
    }
}

/// Rank every group of a document and keep its top finishers.
pub fn placings(document: &TournamentDocument) -> Vec<GroupPlacings> {
    document
        .ranked_tables()
        .into_iter()
        .map(|(group, table)| GroupPlacings::from_table(group, &table))
        .collect()
}

/// Every team finishing in `index` place, in group order.
pub fn finishers(placings: &[GroupPlacings], index: usize) -> Vec<StandingRow> {
    placings.iter().filter_map(|p| p.place(index).cloned()).collect()
}

/// Winners in group order, then the quota pool: runners-up in group order,
/// followed by the selected thirds and fourths best first.
pub fn compose_seeding(placings: &[GroupPlacings]) -> SeedingDraw {
    let quota = PoolQuota::for_group_count(placings.len());

    let mut non_seeded = quota.seconds.select(finishers(placings, 1));
    non_seeded.extend(quota.thirds.select(finishers(placings, 2)));
    non_seeded.extend(quota.fourths.select(finishers(placings, 3)));

    SeedingDraw {
        seeded: finishers(placings, 0),
        non_seeded,
    }
}
