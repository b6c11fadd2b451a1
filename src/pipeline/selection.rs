use serde::Serialize;
use std::cmp::Reverse;
use tracing::{info, instrument};

use crate::domain::RawSighting;
use crate::pipeline::processing::quality_score;

/// Outcome of narrowing the loaded records down to the import set
#[derive(Debug, Clone)]
pub struct Selection {
    pub loaded: usize,
    /// Records with coordinates and local sidereal time
    pub tier_one: usize,
    /// Tier 1 records with at least one corroborating signal
    pub high_signal: usize,
    /// Best records first, at most `max_records`
    pub selected: Vec<RawSighting>,
}

/// Tier 1 filter, high-signal filter, quality ranking, then truncation.
///
/// Ranking is a stable descending sort, so equally scored records keep
/// their file order.
#[instrument(skip(records), fields(loaded = records.len()))]
pub fn select(records: Vec<RawSighting>, max_records: usize) -> Selection {
    let loaded = records.len();

    let tier_one: Vec<RawSighting> =
        records.into_iter().filter(RawSighting::is_tier_one).collect();
    let tier_one_count = tier_one.len();
    info!("Tier 1 (coords + LST): {}", tier_one_count);

    let mut high_signal: Vec<RawSighting> = tier_one
        .into_iter()
        .filter(RawSighting::is_high_signal)
        .collect();
    let high_signal_count = high_signal.len();
    info!("High signal: {}", high_signal_count);

    high_signal.sort_by_cached_key(|r| Reverse(quality_score(r)));
    high_signal.truncate(max_records);
    info!("Selected top {} records", high_signal.len());
    metrics::counter!("ufo_import_records_selected_total").increment(high_signal.len() as u64);

    Selection {
        loaded,
        tier_one: tier_one_count,
        high_signal: high_signal_count,
        selected: high_signal,
    }
}

/// How many selected records carry each kind of corroborating signal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EffectCounts {
    pub physiological_effects: usize,
    pub em_interference: usize,
    pub earthquake_nearby: usize,
    pub multiple_witnesses: usize,
    pub geomagnetic_storm: usize,
}

impl EffectCounts {
    pub fn tally(records: &[RawSighting]) -> Self {
        records.iter().fold(Self::default(), |mut counts, r| {
            counts.physiological_effects += r.has_physiological_effects() as usize;
            counts.em_interference += r.has_em_interference() as usize;
            counts.earthquake_nearby += r.has_earthquake_nearby() as usize;
            counts.multiple_witnesses += r.has_multiple_witnesses() as usize;
            counts.geomagnetic_storm += r.has_geomagnetic_storm() as usize;
            counts
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sighting(value: serde_json::Value) -> RawSighting {
        serde_json::from_value(value).unwrap()
    }

    fn located(extra: serde_json::Value) -> RawSighting {
        let mut base = json!({"latitude": 35.0, "longitude": -106.6, "local_sidereal_time": 3.5});
        if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
            base.extend(extra.clone());
        }
        sighting(base)
    }

    #[test]
    fn test_select_filters_and_counts() {
        let records = vec![
            sighting(json!({"em_interference": true})),                       // no location
            located(json!({})),                                                // tier 1, low signal
            located(json!({"witness_count": 2, "source_id": "a"})),           // quality 2
            located(json!({"physiological_effects": true, "source_id": "b"})), // quality 3
            sighting(json!({"latitude": 35.0, "longitude": -106.6, "witness_count": 4})), // no LST
        ];

        let selection = select(records, 10);
        assert_eq!(selection.loaded, 5);
        assert_eq!(selection.tier_one, 3);
        assert_eq!(selection.high_signal, 2);
        assert_eq!(selection.selected.len(), 2);
        assert!(selection.selected.iter().all(RawSighting::is_tier_one));
        assert_eq!(selection.selected[0].source_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_select_orders_by_quality_descending() {
        let low = located(json!({"witness_count": 2, "source_id": "low"}));
        let high = located(json!({
            "em_interference": true,
            "witness_count": 3,
            "source_id": "high"
        }));
        assert_eq!(quality_score(&low), 2);
        assert_eq!(quality_score(&high), 6);

        let selection = select(vec![low, high], 10);
        let ids: Vec<_> = selection.selected.iter().map(|r| r.source_id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["high", "low"]);
    }

    #[test]
    fn test_select_respects_max_records() {
        let records: Vec<_> = (0..25)
            .map(|i| located(json!({"witness_count": 2 + (i % 3)})))
            .collect();
        let selection = select(records, 10);
        assert_eq!(selection.high_signal, 25);
        assert_eq!(selection.selected.len(), 10);

        let scores: Vec<_> = selection.selected.iter().map(quality_score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_ties_keep_file_order() {
        let records: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|id| located(json!({"em_interference": true, "source_id": id})))
            .collect();
        let selection = select(records, 10);
        let ids: Vec<_> = selection.selected.iter().map(|r| r.source_id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_effect_counts() {
        let records = vec![
            sighting(json!({"physiological_effects": true, "witness_count": 3})),
            sighting(json!({"em_interference": "radio died", "geomagnetic_storm": true})),
            sighting(json!({"earthquake_nearby": false, "witness_count": 1})),
        ];
        let counts = EffectCounts::tally(&records);
        assert_eq!(
            counts,
            EffectCounts {
                physiological_effects: 1,
                em_interference: 1,
                earthquake_nearby: 0,
                multiple_witnesses: 1,
                geomagnetic_storm: 1,
            }
        );
    }
}
