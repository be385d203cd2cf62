//! Difficulty tiers and badge rendering.
//!
//! Levels 1..=30 split into six named tiers of five sub-ranks each. Within a
//! tier, sub-rank 5 is the easiest and 1 the hardest. Level 0 is unrated and
//! anything past the last named tier is shown as Master without a sub-rank.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Unrated,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Ruby,
    Master,
}

const RANKED_TIERS: [Tier; 6] = [
    Tier::Bronze,
    Tier::Silver,
    Tier::Gold,
    Tier::Platinum,
    Tier::Diamond,
    Tier::Ruby,
];

const SUB_RANKS: u32 = 5;

/// Badge color per tier, as hex without the leading `#`.
pub const TIER_COLORS: [(Tier, &str); 8] = [
    (Tier::Unrated, "333333"),
    (Tier::Bronze, "ad5600"),
    (Tier::Silver, "435f7a"),
    (Tier::Gold, "ec9a00"),
    (Tier::Platinum, "27e2a4"),
    (Tier::Diamond, "00b4fc"),
    (Tier::Ruby, "ff0062"),
    (Tier::Master, "b300e0"),
];

impl Tier {
    pub fn name(self) -> &'static str {
        match self {
            Tier::Unrated => "Unrated",
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
            Tier::Ruby => "Ruby",
            Tier::Master => "Master",
        }
    }

    pub fn color(self) -> &'static str {
        TIER_COLORS
            .iter()
            .find(|(tier, _)| *tier == self)
            .map(|(_, color)| *color)
            .unwrap_or("333333")
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tier plus optional sub-rank, e.g. `Gold 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierBadge {
    pub tier: Tier,
    pub sub_rank: Option<u32>,
}

impl TierBadge {
    pub fn from_level(level: u32) -> Self {
        if level == 0 {
            return Self {
                tier: Tier::Unrated,
                sub_rank: None,
            };
        }

        let index = ((level - 1) / SUB_RANKS) as usize;
        match RANKED_TIERS.get(index) {
            Some(tier) => Self {
                tier: *tier,
                sub_rank: Some(SUB_RANKS - (level - 1) % SUB_RANKS),
            },
            None => Self {
                tier: Tier::Master,
                sub_rank: None,
            },
        }
    }

    pub fn label(&self) -> String {
        match self.sub_rank {
            Some(rank) => format!("{} {}", self.tier, rank),
            None => self.tier.to_string(),
        }
    }

    pub fn color(&self) -> &'static str {
        self.tier.color()
    }

    /// shields.io badge image for this tier.
    pub fn image_url(&self) -> String {
        format!(
            "https://img.shields.io/badge/{}-{}?style=flat-square&logo=solved.ac&logoColor=white",
            self.label().replace(' ', "%20"),
            self.color()
        )
    }
}

impl fmt::Display for TierBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
