//! Query-string grammar of the rank collection endpoint.
//!
//! Parameter groups are tried in a fixed order: bounds, nearby, destination,
//! then "all". A group applies only when every one of its parameters is
//! present and non-empty; an incomplete group falls through to the next.
//! Clients racing viewport and search updates may send overlapping groups,
//! so the order is part of the contract.

use std::collections::HashMap;

use rutpoint_transit::{Coordinate, MapBounds};

/// Query parameter names.
pub mod params {
    pub const NE_LAT: &str = "ne_lat";
    pub const NE_LNG: &str = "ne_lng";
    pub const SW_LAT: &str = "sw_lat";
    pub const SW_LNG: &str = "sw_lng";
    pub const LAT: &str = "lat";
    pub const LNG: &str = "lng";
    pub const RADIUS: &str = "radius";
    pub const DESTINATION: &str = "destination";
}

#[derive(Clone, Debug, PartialEq)]
pub enum RankQuery {
    Bounds(MapBounds),
    Nearby { center: Coordinate, radius_m: f64 },
    Destination(String),
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("parameter `{name}` is not a finite number: {value:?}")]
    NotANumber { name: &'static str, value: String },

    #[error("parameter `destination` is blank")]
    BlankDestination,
}

impl RankQuery {
    pub fn from_params(query: &HashMap<String, String>) -> Result<Self, QueryError> {
        if let Some([ne_lat, ne_lng, sw_lat, sw_lng]) = group(
            query,
            [params::NE_LAT, params::NE_LNG, params::SW_LAT, params::SW_LNG],
        ) {
            return Ok(Self::Bounds(MapBounds::new(
                Coordinate::new(number(ne_lat)?, number(ne_lng)?),
                Coordinate::new(number(sw_lat)?, number(sw_lng)?),
            )));
        }

        if let Some([lat, lng, radius]) = group(query, [params::LAT, params::LNG, params::RADIUS]) {
            return Ok(Self::Nearby {
                center: Coordinate::new(number(lat)?, number(lng)?),
                radius_m: number(radius)?,
            });
        }

        if let Some([(_, destination)]) = group(query, [params::DESTINATION]) {
            if destination.trim().is_empty() {
                return Err(QueryError::BlankDestination);
            }
            return Ok(Self::Destination(destination.to_owned()));
        }

        Ok(Self::All)
    }

    /// Query pairs that parse back into this query.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Bounds(bounds) => vec![
                (params::NE_LAT, bounds.northeast.latitude.to_string()),
                (params::NE_LNG, bounds.northeast.longitude.to_string()),
                (params::SW_LAT, bounds.southwest.latitude.to_string()),
                (params::SW_LNG, bounds.southwest.longitude.to_string()),
            ],
            Self::Nearby { center, radius_m } => vec![
                (params::LAT, center.latitude.to_string()),
                (params::LNG, center.longitude.to_string()),
                (params::RADIUS, radius_m.to_string()),
            ],
            Self::Destination(text) => vec![(params::DESTINATION, text.clone())],
            Self::All => Vec::new(),
        }
    }
}

/// All named parameters, or `None` if any is missing or empty.
fn group<'a, const N: usize>(
    query: &'a HashMap<String, String>,
    names: [&'static str; N],
) -> Option<[(&'static str, &'a str); N]> {
    let mut found = [("", ""); N];
    for (slot, name) in found.iter_mut().zip(names) {
        let value = query.get(name).map(String::as_str).filter(|v| !v.is_empty())?;
        *slot = (name, value);
    }
    Some(found)
}

fn number((name, value): (&'static str, &str)) -> Result<f64, QueryError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| QueryError::NotANumber {
            name,
            value: value.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_params_means_all() {
        assert_eq!(RankQuery::from_params(&query(&[])), Ok(RankQuery::All));
    }

    #[test]
    fn test_bounds_group() {
        let parsed = RankQuery::from_params(&query(&[
            ("ne_lat", "-26.0"),
            ("ne_lng", "28.2"),
            ("sw_lat", "-26.2"),
            ("sw_lng", "28.0"),
        ]))
        .unwrap();

        assert_eq!(
            parsed,
            RankQuery::Bounds(MapBounds::new(
                Coordinate::new(-26.0, 28.2),
                Coordinate::new(-26.2, 28.0)
            ))
        );
    }

    #[test]
    fn test_precedence_bounds_over_nearby_over_destination() {
        let everything = query(&[
            ("ne_lat", "1"),
            ("ne_lng", "1"),
            ("sw_lat", "0"),
            ("sw_lng", "0"),
            ("lat", "5"),
            ("lng", "5"),
            ("radius", "10"),
            ("destination", "Sandton"),
        ]);
        assert!(matches!(RankQuery::from_params(&everything), Ok(RankQuery::Bounds(_))));

        let no_bounds = query(&[
            ("lat", "5"),
            ("lng", "5"),
            ("radius", "10"),
            ("destination", "Sandton"),
        ]);
        assert!(matches!(
            RankQuery::from_params(&no_bounds),
            Ok(RankQuery::Nearby { radius_m, .. }) if radius_m == 10.0
        ));

        let only_destination = query(&[("destination", "Sandton")]);
        assert_eq!(
            RankQuery::from_params(&only_destination),
            Ok(RankQuery::Destination("Sandton".into()))
        );
    }

    #[test]
    fn test_incomplete_group_falls_through() {
        let partial = query(&[("ne_lat", "1"), ("ne_lng", "1"), ("destination", "Soweto")]);
        assert_eq!(
            RankQuery::from_params(&partial),
            Ok(RankQuery::Destination("Soweto".into()))
        );

        let empty_value = query(&[("lat", "5"), ("lng", ""), ("radius", "10")]);
        assert_eq!(RankQuery::from_params(&empty_value), Ok(RankQuery::All));
    }

    #[test]
    fn test_non_numeric_is_rejected() {
        let bad = query(&[("lat", "south"), ("lng", "28"), ("radius", "10")]);
        assert_eq!(
            RankQuery::from_params(&bad),
            Err(QueryError::NotANumber {
                name: "lat",
                value: "south".into()
            })
        );

        let infinite = query(&[("lat", "1"), ("lng", "28"), ("radius", "inf")]);
        assert!(RankQuery::from_params(&infinite).is_err());
    }

    #[test]
    fn test_blank_destination_is_rejected() {
        assert_eq!(
            RankQuery::from_params(&query(&[("destination", "   ")])),
            Err(QueryError::BlankDestination)
        );
    }

    #[test]
    fn test_params_parse_back() {
        let original = RankQuery::Nearby {
            center: Coordinate::new(-26.1067, 28.1067),
            radius_m: 5_000_000.0,
        };
        let pairs: HashMap<String, String> = original
            .to_params()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(RankQuery::from_params(&pairs), Ok(original));
    }
}
