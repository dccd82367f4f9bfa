//! Leaderboard ranking.

use leaderboard_domain::{LeaderboardEntry, RankedEntry, ScoreDirection};

/// Order entries best first and number them from 1.
///
/// The sort is stable: entries with equal scores keep their submission order,
/// so the earlier submission ranks higher. Ranks are positional, so ties get
/// distinct consecutive ranks.
pub fn rank_entries(entries: &[LeaderboardEntry], direction: ScoreDirection) -> Vec<RankedEntry> {
    let mut ordered: Vec<&LeaderboardEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| direction.compare(a.score, b.score));

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, entry)| RankedEntry {
            rank: i + 1,
            team_name: entry.team_name.clone(),
            score: entry.score,
            timestamp: entry.timestamp.clone(),
        })
        .collect()
}

/// Rank the entry at `index` would get in [`rank_entries`].
pub fn rank_of(entries: &[LeaderboardEntry], index: usize, direction: ScoreDirection) -> Option<usize> {
    let target = entries.get(index)?;
    let ahead = entries
        .iter()
        .enumerate()
        .filter(|(i, other)| match direction.compare(other.score, target.score) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Equal => *i < index,
            std::cmp::Ordering::Greater => false,
        })
        .count();
    Some(ahead + 1)
}
