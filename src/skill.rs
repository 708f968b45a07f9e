use serde::{Deserialize, Serialize};

/// Number of discrete skill tiers the model accepts.
pub const NUM_SKILL_BUCKETS: i32 = 11;

/// Rating breakpoints for the bucket mapping. The released models were
/// trained with cutoffs at 1100 and 2000 and 100-point-wide tiers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillConfig {
    pub low_cutoff: i32,
    pub high_cutoff: i32,
    pub bucket_width: i32,
}

impl Default for SkillConfig {
    fn default() -> SkillConfig {
        SkillConfig {
            low_cutoff: 1100,
            high_cutoff: 2000,
            bucket_width: 100,
        }
    }
}

/// Maps a rating to a skill bucket in `[0, 10]`.
///
/// Ratings below `low_cutoff` map to bucket 0, ratings at or above
/// `high_cutoff` map to the top bucket, everything else maps stepwise with
/// floor division. Monotonic non-decreasing over increasing rating.
pub fn bucket_for_rating(rating: i32, config: &SkillConfig) -> i32 {
    if rating < config.low_cutoff {
        0
    } else if rating >= config.high_cutoff {
        NUM_SKILL_BUCKETS - 1
    } else {
        (rating - config.low_cutoff) / config.bucket_width + 1
    }
}
