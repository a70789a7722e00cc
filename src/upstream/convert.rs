//! Conversion from discovery venues to restaurant summaries.

use crate::models::RestaurantSummary;

use super::types::{DiscoveryResponse, Venue};

/// Most restaurants returned for a single postcode.
pub const MAX_RESULTS: usize = 10;

/// Keeps the first [`MAX_RESULTS`] venues, in upstream order, as summaries.
pub fn summarize(response: DiscoveryResponse) -> Vec<RestaurantSummary> {
    response
        .restaurants
        .into_iter()
        .take(MAX_RESULTS)
        .map(summarize_venue)
        .collect()
}

/// Maps one venue. The address is "first line, city, postal code".
pub fn summarize_venue(venue: Venue) -> RestaurantSummary {
    let address = format!(
        "{}, {}, {}",
        venue.address.first_line, venue.address.city, venue.address.postal_code
    );
    let cuisines = venue.cuisines.into_iter().map(|c| c.name).collect();

    RestaurantSummary::new(venue.name, cuisines, venue.rating.star_rating, address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::types::{CuisineTag, VenueAddress, VenueRating};

    fn venue(n: usize) -> Venue {
        Venue {
            id: n.to_string(),
            name: format!("Venue {n}"),
            cuisines: vec![
                CuisineTag {
                    name: "Thai".into(),
                    unique_name: "thai".into(),
                },
                CuisineTag {
                    name: "Noodles".into(),
                    unique_name: "noodles".into(),
                },
            ],
            rating: VenueRating {
                star_rating: 4.1,
                count: 10,
            },
            address: VenueAddress {
                first_line: format!("{n} Deiniol Road"),
                city: "Bangor".into(),
                postal_code: "LL57 2UR".into(),
            },
        }
    }

    #[test]
    fn venue_fields_are_mapped() {
        let summary = summarize_venue(venue(3));

        assert_eq!(summary.name(), "Venue 3");
        assert_eq!(summary.cuisines(), ["Thai".to_string(), "Noodles".to_string()]);
        assert_eq!(summary.rating(), 4.1);
        assert_eq!(summary.address(), "3 Deiniol Road, Bangor, LL57 2UR");
    }

    #[test]
    fn results_truncated_to_first_ten_in_order() {
        let response = DiscoveryResponse {
            restaurants: (0..25).map(venue).collect(),
        };

        let summaries = summarize(response);

        assert_eq!(summaries.len(), MAX_RESULTS);
        for (i, summary) in summaries.iter().enumerate() {
            assert_eq!(summary.name(), format!("Venue {i}"));
        }
    }

    #[test]
    fn short_lists_are_kept_whole() {
        let response = DiscoveryResponse {
            restaurants: (0..3).map(venue).collect(),
        };
        assert_eq!(summarize(response).len(), 3);
        assert!(summarize(DiscoveryResponse::default()).is_empty());
    }
}
