use super::model::{CollisionDataset, InjuryCategory};

// ---------------------------------------------------------------------------
// Pure predicate filters – each returns indices into `dataset.records`
// ---------------------------------------------------------------------------

/// Indices of collisions where at least `min` persons were injured.
pub fn min_injured_indices(dataset: &CollisionDataset, min: u32) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.persons_injured >= min)
        .map(|(i, _)| i)
        .collect()
}

/// Indices of collisions whose timestamp falls within the given hour of day.
pub fn hour_indices(dataset: &CollisionDataset, hour: u32) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.hour() == hour)
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Street ranking
// ---------------------------------------------------------------------------

/// One entry of the "top dangerous streets" table. Entries rank individual
/// collisions, not street aggregates, so a street can appear more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedStreet {
    pub street: String,
    pub injured: u32,
}

/// The `n` worst collisions for a category: at least one injury of that type
/// and a known street name, ordered by the category's count descending.
/// The sort is stable, so ties keep dataset order.
pub fn top_streets(
    dataset: &CollisionDataset,
    category: InjuryCategory,
    n: usize,
) -> Vec<RankedStreet> {
    let mut ranked: Vec<RankedStreet> = dataset
        .records
        .iter()
        .filter(|r| category.count(r) >= 1)
        .filter_map(|r| {
            r.street.as_ref().map(|street| RankedStreet {
                street: street.clone(),
                injured: category.count(r),
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.injured.cmp(&a.injured));
    ranked.truncate(n);
    ranked
}
