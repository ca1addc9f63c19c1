use maud::{html, Markup};

use super::layouts::{base, PageConfig};

pub struct RouteInfo {
    pub path: &'static str,
    pub description: &'static str,
    /// Routes with path parameters are listed but not linked.
    pub linkable: bool,
}

pub const ROUTES: &[RouteInfo] = &[
    RouteInfo {
        path: "/api/v1.0/precipitation",
        description: "Precipitation per date and station over the last year of data",
        linkable: true,
    },
    RouteInfo {
        path: "/api/v1.0/stations",
        description: "Station names keyed by station id",
        linkable: true,
    },
    RouteInfo {
        path: "/api/v1.0/tobs",
        description: "Last year of temperature observations for the most active station",
        linkable: true,
    },
    RouteInfo {
        path: "/api/v1.0/<start>",
        description: "Min, average and max temperature from start (YYYY-MM-DD) onwards",
        linkable: false,
    },
    RouteInfo {
        path: "/api/v1.0/<start>/<end>",
        description: "Min, average and max temperature between start and end inclusive",
        linkable: false,
    },
    RouteInfo {
        path: "/api/v1.0/daily_normals/<MM-DD>",
        description: "Daily normals for one calendar day across every recorded year",
        linkable: false,
    },
    RouteInfo {
        path: "/api/v1.0/normals/<start>/<end>",
        description: "Daily normals for each day of a trip",
        linkable: false,
    },
    RouteInfo {
        path: "/api/v1.0/rainfall/<start>/<end>",
        description: "Total rainfall per station between start and end, wettest first",
        linkable: false,
    },
];

pub fn home_page(api_base: &str) -> Markup {
    let config = PageConfig {
        title: "Honolulu Weather Observations",
        api_base,
    };

    base(&config, content(api_base))
}

fn content(api_base: &str) -> Markup {
    html! {
        p class="subtitle" { "Welcome to the Honolulu weather measurements API! Available routes:" }
        table class="table is-fullwidth is-striped" {
            thead {
                tr {
                    th { "Route" }
                    th { "Returns" }
                }
            }
            tbody {
                @for route in ROUTES {
                    tr {
                        td {
                            @if route.linkable {
                                a href=(format!("{}{}", api_base, route.path)) { code { (route.path) } }
                            } @else {
                                code { (route.path) }
                            }
                        }
                        td { (route.description) }
                    }
                }
            }
        }
    }
}
