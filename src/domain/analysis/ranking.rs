//! Ranking helpers shared by the engines that return ordered results.

/// Sorts items by descending score.
///
/// The sort is stable, so ties keep their input order.
pub(crate) fn sort_descending_by<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| score(b).total_cmp(&score(a)));
}
