use crate::models::{QueueStats, Snapshot};

/// Latest snapshot of a queue history (maximum `createdAt`).
///
/// The caller's slice is left untouched: ordering happens on a copy of the
/// references. Duplicate maximum timestamps resolve to whichever one the
/// stable descending sort keeps first. Unparseable timestamps sort as the
/// oldest entries.
pub fn resolve_latest(history: &[Snapshot]) -> Option<&Snapshot> {
    let mut ordered: Vec<&Snapshot> = history.iter().collect();
    ordered.sort_by(|a, b| timestamp_key(b).cmp(&timestamp_key(a)));
    ordered.first().copied()
}

/// Earliest snapshot of a queue history (minimum `createdAt`).
pub fn resolve_earliest(history: &[Snapshot]) -> Option<&Snapshot> {
    let mut ordered: Vec<&Snapshot> = history.iter().collect();
    ordered.sort_by_key(|s| timestamp_key(s));
    ordered.first().copied()
}

/// Net `totalPoints` movement across the whole history. Needs at least two
/// snapshots; otherwise the backend-supplied net change is used.
/// If every `createdAt` ties, latest and earliest can be the same entry and
/// the delta is 0 rather than the fallback.
pub fn points_delta(history: &[Snapshot], fallback: i64) -> i64 {
    if history.len() < 2 {
        return fallback;
    }
    match (resolve_latest(history), resolve_earliest(history)) {
        (Some(latest), Some(earliest)) => latest.total_points - earliest.total_points,
        _ => fallback,
    }
}

pub fn queue_points_delta(queue: &QueueStats) -> i64 {
    let fallback = queue
        .stats
        .map(|stats| stats.points_lost_or_won)
        .unwrap_or(0);
    points_delta(&queue.snapshots, fallback)
}

fn timestamp_key(snapshot: &Snapshot) -> i64 {
    snapshot.created_at_millis().unwrap_or(i64::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(created_at: &str, total_points: i64) -> Snapshot {
        Snapshot {
            created_at: created_at.to_string(),
            total_points,
            ..Snapshot::default()
        }
    }

    #[test]
    fn latest_ignores_input_order() {
        let history = vec![
            snap("2025-03-02T10:00:00Z", 120),
            snap("2025-03-04T10:00:00Z", 180),
            snap("2025-03-01T10:00:00Z", 90),
        ];
        assert_eq!(resolve_latest(&history).map(|s| s.total_points), Some(180));
        assert_eq!(resolve_earliest(&history).map(|s| s.total_points), Some(90));
        assert_eq!(history[0].total_points, 120);
    }

    #[test]
    fn empty_history_has_no_latest() {
        assert!(resolve_latest(&[]).is_none());
        assert!(resolve_earliest(&[]).is_none());
    }

    #[test]
    fn garbage_timestamp_never_wins() {
        let history = vec![snap("not-a-date", 999), snap("2025-03-01T10:00:00Z", 10)];
        assert_eq!(resolve_latest(&history).map(|s| s.total_points), Some(10));
    }

    #[test]
    fn tied_timestamps_yield_zero_delta() {
        let history = vec![
            snap("2025-03-01T10:00:00Z", 100),
            snap("2025-03-01T10:00:00Z", 140),
        ];
        assert_eq!(points_delta(&history, 25), 0);
    }

    #[test]
    fn offsets_compare_as_instants() {
        // 12:00+02:00 is 10:00Z, earlier than 11:00Z.
        let history = vec![
            snap("2025-03-01T12:00:00+02:00", 1),
            snap("2025-03-01T11:00:00Z", 2),
        ];
        assert_eq!(resolve_latest(&history).map(|s| s.total_points), Some(2));
    }
}
