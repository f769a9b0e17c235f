//! Single-feature distance ranking.
//!
//! Generalizes the tempo-window idea to any numeric audio feature:
//! catalog tracks are ranked by absolute distance from the user's mean
//! value of the chosen feature, closest first.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::model::{CatalogTrack, EnrichedTrack};

/// The closed set of numeric features a ranking can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Tempo,
    Popularity,
    Danceability,
    Energy,
    Key,
    Loudness,
    Mode,
    Speechiness,
    Acousticness,
    Liveness,
}

impl Feature {
    pub const ALL: [Feature; 10] = [
        Feature::Tempo,
        Feature::Popularity,
        Feature::Danceability,
        Feature::Energy,
        Feature::Key,
        Feature::Loudness,
        Feature::Mode,
        Feature::Speechiness,
        Feature::Acousticness,
        Feature::Liveness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Tempo => "tempo",
            Feature::Popularity => "popularity",
            Feature::Danceability => "danceability",
            Feature::Energy => "energy",
            Feature::Key => "key",
            Feature::Loudness => "loudness",
            Feature::Mode => "mode",
            Feature::Speechiness => "speechiness",
            Feature::Acousticness => "acousticness",
            Feature::Liveness => "liveness",
        }
    }

    fn of_catalog(self, track: &CatalogTrack) -> Option<f64> {
        match self {
            Feature::Tempo => Some(track.tempo),
            Feature::Popularity => Some(track.popularity as f64),
            Feature::Danceability => track.features.danceability,
            Feature::Energy => track.features.energy,
            Feature::Key => track.features.key,
            Feature::Loudness => track.features.loudness,
            Feature::Mode => track.features.mode,
            Feature::Speechiness => track.features.speechiness,
            Feature::Acousticness => track.features.acousticness,
            Feature::Liveness => track.features.liveness,
        }
    }

    fn of_enriched(self, track: &EnrichedTrack) -> Option<f64> {
        match self {
            Feature::Tempo => Some(track.tempo),
            Feature::Popularity => Some(track.popularity as f64),
            Feature::Danceability => track.features.danceability,
            Feature::Energy => track.features.energy,
            Feature::Key => track.features.key,
            Feature::Loudness => track.features.loudness,
            Feature::Mode => track.features.mode,
            Feature::Speechiness => track.features.speechiness,
            Feature::Acousticness => track.features.acousticness,
            Feature::Liveness => track.features.liveness,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|feature| feature.name() == normalized)
            .ok_or_else(|| Error::invalid_feature(format!("unknown feature '{s}'")))
    }
}

/// A catalog track projected to the ranked feature.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureMatch {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub value: f64,
}

/// Rank catalog tracks by absolute distance from the user's mean value
/// of `feature`, closest first.
///
/// The sort is stable (equal distances keep catalog order), duplicate
/// identifiers keep their first occurrence, and the result is truncated
/// to `size`. Fails with [`Error::InvalidFeature`] when no row of the
/// user table or of the catalog carries a value for the feature, and
/// with [`Error::EmptyInput`] on an empty user table.
pub fn recommend_by_feature(
    catalog: &Catalog,
    user: &[EnrichedTrack],
    feature: Feature,
    size: usize,
) -> Result<Vec<FeatureMatch>> {
    if user.is_empty() {
        return Err(Error::empty_input(format!("mean {feature}")));
    }

    let values: Vec<f64> = user.iter().filter_map(|t| feature.of_enriched(t)).collect();
    if values.is_empty() {
        return Err(Error::invalid_feature(format!(
            "'{feature}' is not present in the user playlist"
        )));
    }
    let target = values.iter().sum::<f64>() / values.len() as f64;

    let mut candidates: Vec<(&CatalogTrack, f64)> = catalog
        .tracks()
        .iter()
        .filter_map(|t| feature.of_catalog(t).map(|value| (t, value)))
        .collect();
    if candidates.is_empty() {
        return Err(Error::invalid_feature(format!(
            "'{feature}' is not present in the catalog"
        )));
    }

    candidates.sort_by(|a, b| (a.1 - target).abs().total_cmp(&(b.1 - target).abs()));

    let mut seen: HashSet<&str> = HashSet::new();
    let mut matches = Vec::new();
    for (track, value) in candidates {
        if matches.len() == size {
            break;
        }
        if !seen.insert(track.id.as_str()) {
            continue;
        }
        matches.push(FeatureMatch {
            id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            value,
        });
    }

    debug!(
        target: "recommend::feature",
        feature = %feature,
        mean = target,
        returned = matches.len(),
        "feature ranking complete"
    );

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AudioFeatures;
    use crate::test_utils::{catalog_track, enriched_track};

    fn track_with_energy(id: &str, energy: f64) -> CatalogTrack {
        CatalogTrack {
            features: AudioFeatures {
                energy: Some(energy),
                ..Default::default()
            },
            ..catalog_track(id, "Song", "Artist", 120.0, 50, "p")
        }
    }

    fn user_with_energy(energy: f64) -> EnrichedTrack {
        EnrichedTrack {
            features: AudioFeatures {
                energy: Some(energy),
                ..Default::default()
            },
            ..enriched_track("u1", 120.0)
        }
    }

    #[test]
    fn test_feature_parses_known_names() {
        assert_eq!("energy".parse::<Feature>().unwrap(), Feature::Energy);
        assert_eq!("TEMPO".parse::<Feature>().unwrap(), Feature::Tempo);
    }

    #[test]
    fn test_unknown_feature_name_fails() {
        let err = "volume".parse::<Feature>().unwrap_err();
        assert!(matches!(err, Error::InvalidFeature(_)));
        assert!(err.to_string().contains("volume"));
    }

    #[test]
    fn test_ranking_sorts_by_distance_from_user_mean() {
        let catalog = Catalog::from_tracks(vec![
            track_with_energy("far", 0.1),
            track_with_energy("closest", 0.52),
            track_with_energy("near", 0.6),
        ]);
        let user = vec![user_with_energy(0.5)];

        let result = recommend_by_feature(&catalog, &user, Feature::Energy, 10).unwrap();
        let ids: Vec<&str> = result.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["closest", "near", "far"]);
        assert_eq!(result[0].value, 0.52);
    }

    #[test]
    fn test_ranking_truncates_to_size() {
        let catalog = Catalog::from_tracks(
            (0..20)
                .map(|i| track_with_energy(&format!("t{i}"), i as f64 / 20.0))
                .collect(),
        );
        let user = vec![user_with_energy(0.5)];

        let result = recommend_by_feature(&catalog, &user, Feature::Energy, 3).unwrap();
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_ranking_works_on_tempo_without_secondary_features() {
        let catalog = Catalog::from_tracks(vec![
            catalog_track("t1", "One", "A", 100.0, 50, "p"),
            catalog_track("t2", "Two", "B", 130.0, 60, "p"),
        ]);
        let user = vec![enriched_track("u1", 105.0)];

        let result = recommend_by_feature(&catalog, &user, Feature::Tempo, 10).unwrap();
        assert_eq!(result[0].id, "t1");
    }

    #[test]
    fn test_feature_absent_from_catalog_fails() {
        // Catalog rows carry no energy values at all.
        let catalog = Catalog::from_tracks(vec![catalog_track("t1", "One", "A", 100.0, 50, "p")]);
        let user = vec![user_with_energy(0.5)];

        let err = recommend_by_feature(&catalog, &user, Feature::Energy, 10).unwrap_err();
        assert!(matches!(err, Error::InvalidFeature(_)));
        assert!(err.to_string().contains("catalog"));
    }

    #[test]
    fn test_feature_absent_from_playlist_fails() {
        let catalog = Catalog::from_tracks(vec![track_with_energy("t1", 0.4)]);
        let user = vec![enriched_track("u1", 120.0)];

        let err = recommend_by_feature(&catalog, &user, Feature::Energy, 10).unwrap_err();
        assert!(matches!(err, Error::InvalidFeature(_)));
        assert!(err.to_string().contains("playlist"));
    }

    #[test]
    fn test_empty_user_table_fails() {
        let catalog = Catalog::from_tracks(vec![track_with_energy("t1", 0.4)]);
        let err = recommend_by_feature(&catalog, &[], Feature::Energy, 10).unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
    }
}
