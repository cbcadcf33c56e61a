/// Weight of a declared interest at zero-based `rank`.
///
/// First choice scores 0.5, second 0.25, third 1/6, and so on. Lower aggregate
/// totals mean a task is more broadly wanted, so the ordering is min-first.
pub fn rank_score(rank: usize) -> f64 {
    1.0 / (2.0 * (rank as f64 + 1.0))
}
