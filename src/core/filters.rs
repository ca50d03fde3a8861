use crate::models::{FilterCriteria, Pandal};

/// Check the pandal's rating against the minimum rating, if any
#[inline]
pub fn matches_rating(pandal: &Pandal, criteria: &FilterCriteria) -> bool {
    criteria
        .min_rating
        .map_or(true, |min_rating| pandal.rating() >= min_rating)
}

#[inline]
pub fn matches_crowd_level(pandal: &Pandal, criteria: &FilterCriteria) -> bool {
    criteria.crowd_levels.is_empty() || criteria.crowd_levels.contains(&pandal.crowd_level)
}

#[inline]
pub fn matches_area(pandal: &Pandal, criteria: &FilterCriteria) -> bool {
    criteria.areas.is_empty() || criteria.areas.contains(&pandal.area)
}

/// Check the distance limit
///
/// A pandal with an unknown distance (no user location) is never dropped.
#[inline]
pub fn within_distance(distance_km: Option<f64>, criteria: &FilterCriteria) -> bool {
    match (criteria.max_distance_km, distance_km) {
        (Some(max_distance_km), Some(distance_km)) => distance_km <= max_distance_km,
        _ => true,
    }
}

/// Case-insensitive substring match against name, description and address
pub fn matches_text(pandal: &Pandal, criteria: &FilterCriteria) -> bool {
    let query = match criteria.text_query.as_deref().map(str::trim) {
        Some(query) if !query.is_empty() => query.to_lowercase(),
        _ => return true,
    };

    [&pandal.name, &pandal.description, &pandal.address]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Apply every filter predicate conjunctively
#[inline]
pub fn matches_criteria(pandal: &Pandal, distance_km: Option<f64>, criteria: &FilterCriteria) -> bool {
    matches_rating(pandal, criteria)
        && matches_crowd_level(pandal, criteria)
        && matches_area(pandal, criteria)
        && within_distance(distance_km, criteria)
        && matches_text(pandal, criteria)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Area, Coordinate, CrowdLevel};

    fn create_test_pandal(rating: Option<f64>, crowd_level: CrowdLevel, area: Area) -> Pandal {
        Pandal {
            id: "p1".to_string(),
            slug: "kumartuli-park".to_string(),
            name: "Kumartuli Park".to_string(),
            description: "Idol makers' quarter".to_string(),
            address: "Rabindra Sarani, Kumartuli".to_string(),
            location: Coordinate { latitude: 22.6007, longitude: 88.3606 },
            rating,
            crowd_level,
            area,
            image_file_ids: vec![],
            created_at: None,
        }
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let pandal = create_test_pandal(None, CrowdLevel::High, Area::Other);
        assert!(matches_criteria(&pandal, None, &FilterCriteria::default()));
    }

    #[test]
    fn test_rating_filter() {
        let criteria = FilterCriteria {
            min_rating: Some(4.0),
            ..Default::default()
        };

        assert!(matches_rating(&create_test_pandal(Some(4.0), CrowdLevel::Low, Area::North), &criteria));
        assert!(!matches_rating(&create_test_pandal(Some(3.9), CrowdLevel::Low, Area::North), &criteria));
        // Missing rating counts as 0
        assert!(!matches_rating(&create_test_pandal(None, CrowdLevel::Low, Area::North), &criteria));
    }

    #[test]
    fn test_crowd_and_area_sets() {
        let criteria = FilterCriteria {
            crowd_levels: [CrowdLevel::Low, CrowdLevel::Medium].into_iter().collect(),
            areas: [Area::North].into_iter().collect(),
            ..Default::default()
        };

        let quiet_north = create_test_pandal(Some(4.0), CrowdLevel::Low, Area::North);
        let busy_north = create_test_pandal(Some(4.0), CrowdLevel::High, Area::North);
        let quiet_south = create_test_pandal(Some(4.0), CrowdLevel::Medium, Area::South);

        assert!(matches_criteria(&quiet_north, None, &criteria));
        assert!(!matches_criteria(&busy_north, None, &criteria));
        assert!(!matches_criteria(&quiet_south, None, &criteria));
    }

    #[test]
    fn test_distance_filter_keeps_unknown_distance() {
        let criteria = FilterCriteria {
            max_distance_km: Some(2.0),
            ..Default::default()
        };

        assert!(within_distance(Some(2.0), &criteria));
        assert!(!within_distance(Some(2.1), &criteria));
        assert!(within_distance(None, &criteria));
    }

    #[test]
    fn test_text_filter() {
        let pandal = create_test_pandal(Some(4.0), CrowdLevel::Low, Area::North);

        let by_name = FilterCriteria {
            text_query: Some("KUMARTULI".to_string()),
            ..Default::default()
        };
        let by_description = FilterCriteria {
            text_query: Some("idol".to_string()),
            ..Default::default()
        };
        let miss = FilterCriteria {
            text_query: Some("santosh mitra".to_string()),
            ..Default::default()
        };
        let blank = FilterCriteria {
            text_query: Some("   ".to_string()),
            ..Default::default()
        };

        assert!(matches_text(&pandal, &by_name));
        assert!(matches_text(&pandal, &by_description));
        assert!(!matches_text(&pandal, &miss));
        assert!(matches_text(&pandal, &blank));
    }
}
