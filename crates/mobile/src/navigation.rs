//! Hand-off to external navigation apps.
//!
//! A [`NavigationRequest`] says where to go. A [`NavigationResolver`] turns it
//! into targets the host can open. Launching them is up to the host.

use std::sync::Arc;

use rutpoint_transit::{Coordinate, Rank, Route};

#[derive(Clone, Debug, PartialEq)]
pub struct NavigationRequest {
    pub destination: Coordinate,
    /// Title for the host's app chooser. Map links address coordinates only,
    /// so the name is never written into a URL.
    pub destination_name: Option<Arc<str>>,
    pub origin: Option<Coordinate>,
    pub waypoints: Vec<Coordinate>,
}

impl NavigationRequest {
    /// Directions from the user to a rank, through the selected route's
    /// waypoints if one is selected.
    pub fn to_rank(rank: &Rank, user_location: Option<Coordinate>, route: Option<&Route>) -> Self {
        Self {
            destination: rank.location,
            destination_name: Some(Arc::clone(&rank.name)),
            origin: user_location,
            waypoints: route.map(|r| r.waypoints.clone()).unwrap_or_default(),
        }
    }

    /// Directions from a rank to the end of one of its routes.
    pub fn along_route(rank: &Rank, route: &Route) -> Self {
        Self {
            destination: route.coordinates,
            destination_name: Some(Arc::clone(&route.name)),
            origin: Some(rank.location),
            waypoints: route.waypoints.clone(),
        }
    }
}

/// Something the host can open, e.g. a URL for one navigation app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationTarget {
    pub title: &'static str,
    pub url: String,
}

pub trait NavigationResolver: Send + Sync {
    fn resolve(&self, request: &NavigationRequest) -> Vec<NavigationTarget>;
}

/// Web links for Google Maps and Waze; both open in a browser or the
/// installed app.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebMapsResolver;

impl NavigationResolver for WebMapsResolver {
    fn resolve(&self, request: &NavigationRequest) -> Vec<NavigationTarget> {
        vec![
            NavigationTarget {
                title: "Google Maps",
                url: google_maps_url(request),
            },
            NavigationTarget {
                title: "Waze",
                url: format!(
                    "https://waze.com/ul?ll={}&navigate=yes&z=10",
                    lat_lng(request.destination)
                ),
            },
        ]
    }
}

/// Apple Maps first, then the web targets, as offered on iOS.
#[derive(Clone, Copy, Debug, Default)]
pub struct AppleMapsResolver;

impl NavigationResolver for AppleMapsResolver {
    fn resolve(&self, request: &NavigationRequest) -> Vec<NavigationTarget> {
        let mut targets = vec![NavigationTarget {
            title: "Apple Maps",
            url: apple_maps_url(request),
        }];
        targets.extend(WebMapsResolver.resolve(request));
        targets
    }
}

/// With waypoints the trip is routed through them from the origin and the
/// final waypoint stands in for the destination.
fn apple_maps_url(request: &NavigationRequest) -> String {
    if request.waypoints.is_empty() {
        return format!(
            "maps://maps.apple.com/?daddr={}&dirflg=d",
            lat_lng(request.destination)
        );
    }

    let waypoints: Vec<String> = request.waypoints.iter().copied().map(lat_lng).collect();
    let mut url = String::from("maps://maps.apple.com/?");
    if let Some(origin) = request.origin {
        url.push_str(&format!("saddr={}&", lat_lng(origin)));
    }
    url.push_str(&format!("daddr={}&dirflg=d", waypoints.join("|")));
    url
}

fn google_maps_url(request: &NavigationRequest) -> String {
    let destination = lat_lng(request.destination);
    let Some(origin) = request.origin else {
        return format!("https://www.google.com/maps/search/?api=1&query={destination}");
    };

    let mut url = format!(
        "https://www.google.com/maps/dir/?api=1&origin={}&destination={destination}",
        lat_lng(origin)
    );
    if !request.waypoints.is_empty() {
        let waypoints: Vec<String> = request.waypoints.iter().copied().map(lat_lng).collect();
        url.push_str("&waypoints=");
        url.push_str(&waypoints.join("|"));
    }
    url.push_str("&travelmode=driving");
    url
}

fn lat_lng(point: Coordinate) -> String {
    format!("{},{}", point.latitude, point.longitude)
}

#[cfg(test)]
mod tests {
    use rutpoint_transit::RouteIdentifier;
    use rutpoint_transit::provider::fixture;

    use super::*;

    fn randburg() -> Rank {
        fixture::reference_ranks().remove(1)
    }

    #[test]
    fn test_to_rank_without_location_searches() {
        let request = NavigationRequest::to_rank(&randburg(), None, None);
        let targets = WebMapsResolver.resolve(&request);

        assert_eq!(
            targets[0].url,
            "https://www.google.com/maps/search/?api=1&query=-26.0891,28.0012"
        );
        assert_eq!(
            targets[1].url,
            "https://waze.com/ul?ll=-26.0891,28.0012&navigate=yes&z=10"
        );
    }

    #[test]
    fn test_to_rank_with_route_uses_waypoints() {
        let rank = randburg();
        let sandton = rank.route(&RouteIdentifier::new("20")).unwrap();
        let user = Coordinate::new(-26.2, 28.0);

        let request = NavigationRequest::to_rank(&rank, Some(user), Some(sandton));
        assert_eq!(request.destination, rank.location);
        assert_eq!(request.waypoints, sandton.waypoints);

        let url = &WebMapsResolver.resolve(&request)[0].url;
        assert!(url.starts_with(
            "https://www.google.com/maps/dir/?api=1&origin=-26.2,28&destination=-26.0891,28.0012"
        ));
        assert!(url.ends_with("&travelmode=driving"));
        assert_eq!(url.matches('|').count(), sandton.waypoints.len().saturating_sub(1));
    }

    #[test]
    fn test_along_route_starts_at_the_rank() {
        let rank = randburg();
        let rosebank = rank.route(&RouteIdentifier::new("21")).unwrap();

        let request = NavigationRequest::along_route(&rank, rosebank);

        assert_eq!(request.origin, Some(rank.location));
        assert_eq!(request.destination, rosebank.coordinates);
        assert_eq!(request.destination_name.as_deref(), Some("Rosebank"));
    }

    #[test]
    fn test_apple_maps_leads_the_ios_targets() {
        let rank = randburg();
        let request = NavigationRequest::to_rank(&rank, None, None);
        let targets = AppleMapsResolver.resolve(&request);

        let titles: Vec<&str> = targets.iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Apple Maps", "Google Maps", "Waze"]);
        assert_eq!(
            targets[0].url,
            "maps://maps.apple.com/?daddr=-26.0891,28.0012&dirflg=d"
        );
        assert_eq!(&targets[1..], WebMapsResolver.resolve(&request).as_slice());
    }

    #[test]
    fn test_apple_maps_routes_through_waypoints() {
        let request = NavigationRequest {
            destination: Coordinate::new(-26.1, 28.05),
            destination_name: Some("Sandton & Rosebank".into()),
            origin: Some(Coordinate::new(-26.2, 28.0)),
            waypoints: vec![Coordinate::new(-26.15, 28.02), Coordinate::new(-26.12, 28.04)],
        };

        let url = &AppleMapsResolver.resolve(&request)[0].url;
        assert_eq!(
            url,
            "maps://maps.apple.com/?saddr=-26.2,28&daddr=-26.15,28.02|-26.12,28.04&dirflg=d"
        );
        // The label stays out of every link.
        for target in AppleMapsResolver.resolve(&request) {
            assert!(!target.url.contains("Sandton"), "{}", target.url);
        }
    }
}
