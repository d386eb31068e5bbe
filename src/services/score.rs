/// Popularity scoring
///
/// `score` is the single ranking formula for both the freshness-ranked and
/// the chronological-looking feed: disabling decay is expressed by passing
/// an effectively infinite half-life, not a separate code path.
use chrono::{DateTime, Utc};

/// Half-life that renders decay a no-op for any realistic post age.
pub const DECAY_DISABLED_HALF_LIFE_HOURS: f64 = 1e9;

/// Compute the time-decayed popularity score for a post.
///
/// `log10(like_count + 1)` dampens raw popularity differences at scale and
/// guarantees a zero score for zero likes regardless of age. Negative ages
/// (clock skew, future timestamps) clamp to zero instead of inflating the
/// score.
pub fn score(
    like_count: i64,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    half_life_hours: f64,
) -> f64 {
    let base = ((like_count.max(0) + 1) as f64).log10();
    let age_hours = ((now - created_at).num_milliseconds().max(0)) as f64 / 3_600_000.0;
    let decay = 0.5_f64.powf(age_hours / half_life_hours);
    base * decay
}
