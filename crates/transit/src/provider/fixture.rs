//! The reference data set: two Johannesburg ranks.
//!
//! Used when the server is started without a data file, and by tests that
//! check behaviour against literal coordinates.

use std::sync::Arc;

use crate::identifiers::{RankIdentifier, RouteIdentifier};
use crate::models::types::*;
use crate::provider::static_provider::StaticRankProvider;

const fn c(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate::new(latitude, longitude)
}

fn route(id: &str, name: &str, coordinates: Coordinate, fare: f64, waypoints: &[Coordinate]) -> Route {
    Route {
        id: RouteIdentifier::new(id),
        name: name.into(),
        coordinates,
        waypoints: waypoints.to_vec(),
        fare,
    }
}

fn pickup(name: &str, address: &str, coordinates: Coordinate) -> AdditionalLocation {
    AdditionalLocation {
        name: name.into(),
        address: address.into(),
        coordinates,
    }
}

fn tags(values: &[&str]) -> Vec<Arc<str>> {
    values.iter().map(|value| Arc::from(*value)).collect()
}

/// Alexandra Main Taxi Rank ("1") and Randburg Taxi Rank ("2").
pub fn reference_ranks() -> Vec<Rank> {
    vec![alexandra(), randburg()]
}

/// [`reference_ranks`] loaded into an indexed provider.
pub fn reference_provider() -> Result<StaticRankProvider> {
    StaticRankProvider::from_ranks(reference_ranks())
}

fn alexandra() -> Rank {
    let origin = c(-26.1067, 28.1067);

    Rank {
        id: RankIdentifier::new("1"),
        name: "Alexandra Main Taxi Rank".into(),
        location: origin,
        address: "15th Avenue corner Selborne, Alexandra".into(),
        fare_range: FareRange { min: 6.0, max: 28.0 },
        facilities: tags(&["Shelter", "Seating", "Public Toilets", "Security", "Queue Marshals"]),
        routes: vec![
            route("1", "Local", origin, 6.0, &[
                origin,
                c(-26.1078, 28.1089),
                c(-26.1089, 28.1078),
                c(-26.1056, 28.1045),
                c(-26.1034, 28.1123),
                c(-26.1045, 28.1112),
                origin,
            ]),
            route("2", "Johannesburg", c(-26.2041, 28.0473), 11.0, &[
                origin,
                c(-26.1112, 28.1056),
                c(-26.1167, 28.0917),
                c(-26.1521, 28.0417),
                c(-26.1733, 28.0517),
                c(-26.1833, 28.0667),
                c(-26.2012, 28.0473),
                c(-26.2041, 28.0473),
            ]),
            route("3", "Randburg", c(-26.0891, 28.0012), 11.0, &[
                origin,
                c(-26.1089, 28.0917),
                c(-26.1167, 28.0667),
                c(-26.1167, 28.0417),
                c(-26.1167, 28.0167),
                c(-26.1056, 28.0123),
                c(-26.0967, 28.0067),
                c(-26.0891, 28.0012),
            ]),
            route("4", "Sandton", c(-26.1067, 28.0567), 8.5, &[
                origin,
                c(-26.1089, 28.0917),
                c(-26.1089, 28.0817),
                c(-26.1078, 28.0717),
                c(-26.1067, 28.0667),
                c(-26.1067, 28.0617),
                c(-26.1067, 28.0567),
            ]),
            route("5", "Pretoria", c(-25.7479, 28.2293), 28.0, &[]),
            route("6", "Edenvale", c(-26.1393, 28.1667), 10.0, &[]),
            route("7", "Jewish", c(-26.1521, 28.0417), 9.0, &[]),
            route("8", "Longmeadow", c(-26.0833, 28.1500), 9.0, &[]),
            route("9", "Modderfontein", c(-26.0833, 28.1667), 10.0, &[]),
            route("10", "Germiston", c(-26.2167, 28.1667), 13.0, &[]),
            route("11", "Kempton Park", c(-26.1000, 28.2333), 14.0, &[]),
            route("12", "Baracity", c(-26.1833, 28.3167), 15.0, &[]),
            route("13", "Cosmos City", c(-26.0247, 27.9292), 17.0, &[]),
            route("14", "Kya Sands", c(-26.0333, 27.9667), 16.0, &[]),
            route("15", "Fourways/Douglasdale", c(-26.0167, 28.0167), 12.0, &[]),
            route("16", "Denver", c(-26.2167, 28.0667), 13.0, &[]),
            route("17", "Eastgate", c(-26.1833, 28.1167), 11.0, &[]),
            route("18", "Craighall", c(-26.1167, 28.0167), 11.0, &[]),
            route("19", "Rosebank", c(-26.1467, 28.0367), 11.0, &[]),
        ],
        operating_hours: OperatingHours {
            open: "04:00".into(),
            close: "19:00".into(),
        },
        contact_number: Some("011 123 4567".into()),
        rating: 4.2,
        number_of_ratings: 156,
        additional_locations: Some(vec![
            pickup("Police Station Rank", "15th Avenue corner Selborne, Alexandra", origin),
            pickup("John Branbt Rank", "15th Avenue corner John Branbt, Alexandra", c(-26.1078, 28.1089)),
            pickup("Rooth Corner Rank", "20th Avenue corner Rooth, Alexandra", c(-26.1056, 28.1045)),
            pickup("Tsutsumani Rank", "Tsutsumani next to first park, Alexandra", c(-26.1034, 28.1123)),
            pickup("London Road Rank", "8th Avenue corner London Road, Alexandra", c(-26.1089, 28.1078)),
            pickup("Madala Rank", "3rd Avenue next to Kwa madala hostel, Alexandra", c(-26.1112, 28.1056)),
            pickup(
                "Pan Africa Rank",
                "Pan Africa Mall and shell garage next to Boxer store, Alexandra",
                c(-26.1045, 28.1112),
            ),
        ]),
    }
}

fn randburg() -> Rank {
    let origin = c(-26.0891, 28.0012);

    Rank {
        id: RankIdentifier::new("2"),
        name: "Randburg Taxi Rank".into(),
        location: origin,
        address: "123 Jan Smuts Ave, Randburg".into(),
        fare_range: FareRange { min: 15.0, max: 25.0 },
        facilities: tags(&["Shelter", "Seating", "Public Toilets"]),
        routes: vec![
            route("20", "Sandton", c(-26.1067, 28.0567), 15.0, &[
                origin,
                c(-26.0917, 28.0089),
                c(-26.0934, 28.0156),
                c(-26.0950, 28.0234),
                c(-26.0989, 28.0345),
                c(-26.1023, 28.0456),
                c(-26.1045, 28.0512),
                c(-26.1067, 28.0567),
            ]),
            route("21", "Rosebank", c(-26.1467, 28.0367), 12.0, &[
                origin,
                c(-26.0917, 28.0089),
                c(-26.0967, 28.0123),
                c(-26.1089, 28.0167),
                c(-26.1234, 28.0234),
                c(-26.1345, 28.0312),
                c(-26.1412, 28.0345),
                c(-26.1467, 28.0367),
            ]),
        ],
        operating_hours: OperatingHours {
            open: "04:30".into(),
            close: "21:00".into(),
        },
        contact_number: Some("011 789 1234".into()),
        rating: 4.2,
        number_of_ratings: 156,
        additional_locations: None,
    }
}

/// Minimal rank for tests: one route per destination name, at the rank itself.
#[cfg(test)]
pub(crate) fn rank_at(id: &str, latitude: f64, longitude: f64, destinations: &[&str]) -> Rank {
    let location = c(latitude, longitude);
    Rank {
        id: RankIdentifier::new(id),
        name: format!("Rank {id}").into(),
        location,
        address: "".into(),
        fare_range: FareRange { min: 0.0, max: 0.0 },
        facilities: Vec::new(),
        routes: destinations
            .iter()
            .enumerate()
            .map(|(i, name)| route(&i.to_string(), name, location, 10.0, &[]))
            .collect(),
        operating_hours: OperatingHours {
            open: "05:00".into(),
            close: "20:00".into(),
        },
        contact_number: None,
        rating: 0.0,
        number_of_ratings: 0,
        additional_locations: None,
    }
}
