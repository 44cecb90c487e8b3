//! # Routes & QR Payloads
//!
//! Paths the app answers to, which view each one shows for the current role, and
//! the URL printed into each table's QR code.
//!
//! ```text
//! /                                   home
//! /login, /register                   public
//! /dashboard                          signed-in only, view depends on role
//! /table/{restaurantId}/{tableId}     public ordering page (QR target)
//! ```

use crate::model::{RestaurantId, Role, TableId};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;
use url::Url;

/// Escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RouteError {
    #[error("Invalid QR payload: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Table {
        restaurant_id: RestaurantId,
        table_id: TableId,
    },
}

impl Route {
    /// Parses an absolute path. Unknown paths give `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["dashboard"] => Some(Route::Dashboard),
            ["table", restaurant, table] => Some(Route::Table {
                restaurant_id: decode_restaurant(restaurant)?,
                table_id: table.parse().ok()?,
            }),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::Login => "/login".into(),
            Route::Register => "/register".into(),
            Route::Dashboard => "/dashboard".into(),
            Route::Table {
                restaurant_id,
                table_id,
            } => format!(
                "/table/{}/{table_id}",
                utf8_percent_encode(&restaurant_id.0, SEGMENT)
            ),
        }
    }
}

/// What the app shows for a route.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Home,
    Login,
    Register,
    RestaurantDashboard,
    CustomerDashboard,
    TableOrder {
        restaurant_id: RestaurantId,
        table_id: TableId,
    },
    Redirect(Route),
}

/// Role gate. Only the dashboard needs a session.
pub fn resolve(route: Route, role: Option<Role>) -> View {
    match route {
        Route::Home => View::Home,
        Route::Login => View::Login,
        Route::Register => View::Register,
        Route::Dashboard => match role {
            Some(Role::Restaurant) => View::RestaurantDashboard,
            Some(Role::Customer) => View::CustomerDashboard,
            None => View::Redirect(Route::Login),
        },
        Route::Table {
            restaurant_id,
            table_id,
        } => View::TableOrder {
            restaurant_id,
            table_id,
        },
    }
}

/// The pair a table's QR code encodes.
#[derive(Debug, Clone, PartialEq)]
pub struct QrPayload {
    pub restaurant_id: RestaurantId,
    pub table_id: TableId,
}

impl QrPayload {
    /// `{base}/table/{restaurantId}/{tableId}`, keeping any path prefix of `base`.
    /// Query and fragment of `base` are dropped.
    pub fn to_url(&self, base: &str) -> Result<String, RouteError> {
        let invalid = || RouteError::Validation(format!("not a base URL: '{base}'"));

        let mut url = Url::parse(base.trim()).map_err(|_| invalid())?;
        url.set_query(None);
        url.set_fragment(None);
        let table = self.table_id.to_string();
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["table", self.restaurant_id.0.as_str(), table.as_str()]);
        Ok(url.into())
    }

    /// Reads a scanned URL back from its last three path segments. Host, path
    /// prefix and query are ignored.
    pub fn parse(scanned: &str) -> Result<QrPayload, RouteError> {
        let invalid = |why: &str| RouteError::Validation(format!("{why}: '{scanned}'"));

        let url = Url::parse(scanned.trim()).map_err(|_| invalid("not a URL"))?;
        let mut segments: Vec<&str> = url
            .path_segments()
            .ok_or_else(|| invalid("no path"))?
            .collect();
        if segments.last() == Some(&"") {
            segments.pop();
        }

        match segments.as_slice() {
            [.., "table", restaurant, table] => Ok(QrPayload {
                restaurant_id: decode_restaurant(restaurant)
                    .ok_or_else(|| invalid("bad restaurant id"))?,
                table_id: table.parse().map_err(|_| invalid("bad table id"))?,
            }),
            _ => Err(invalid("not a table link")),
        }
    }

    pub fn route(&self) -> Route {
        Route::Table {
            restaurant_id: self.restaurant_id.clone(),
            table_id: self.table_id,
        }
    }
}

fn decode_restaurant(segment: &str) -> Option<RestaurantId> {
    let decoded = percent_decode_str(segment).decode_utf8().ok()?;
    if decoded.is_empty() {
        return None;
    }
    Some(RestaurantId(decoded.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/login"), Some(Route::Login));
        assert_eq!(Route::parse("/dashboard/"), Some(Route::Dashboard));
        assert_eq!(
            Route::parse("/table/r1/table_4?x=1"),
            Some(Route::Table {
                restaurant_id: RestaurantId::from("r1"),
                table_id: TableId(4)
            })
        );
        assert_eq!(Route::parse("/menu"), None);
        assert_eq!(Route::parse("/table/r1"), None);
        assert_eq!(Route::parse("/table/r1/abc"), None);
    }

    #[test]
    fn test_dashboard_is_role_gated() {
        assert_eq!(
            resolve(Route::Dashboard, None),
            View::Redirect(Route::Login)
        );
        assert_eq!(
            resolve(Route::Dashboard, Some(Role::Restaurant)),
            View::RestaurantDashboard
        );
        assert_eq!(
            resolve(Route::Dashboard, Some(Role::Customer)),
            View::CustomerDashboard
        );
    }

    #[test]
    fn test_table_page_is_public() {
        let route = Route::parse("/table/r9/table_2").unwrap();
        assert!(matches!(resolve(route, None), View::TableOrder { .. }));
    }

    #[test]
    fn test_qr_url_round_trip() {
        let qr = QrPayload {
            restaurant_id: RestaurantId::from("abc123"),
            table_id: TableId(5),
        };
        let url = qr.to_url("https://order.example.com/").unwrap();
        assert_eq!(url, "https://order.example.com/table/abc123/table_5");
        assert_eq!(QrPayload::parse(&url).unwrap(), qr);
        assert_eq!(Route::parse(&qr.route().path()), Some(qr.route()));
    }

    #[test]
    fn test_qr_url_keeps_base_path() {
        let qr = QrPayload {
            restaurant_id: RestaurantId::from("abc"),
            table_id: TableId(1),
        };
        for base in [
            "https://eat.example.com/menu",
            "https://eat.example.com/menu/",
            "https://eat.example.com/a/b?utm=qr",
        ] {
            let url = qr.to_url(base).unwrap();
            assert!(url.ends_with("/table/abc/table_1"), "{url}");
            assert_eq!(QrPayload::parse(&url).unwrap(), qr, "{base}");
        }
        assert_eq!(
            qr.to_url("https://eat.example.com/menu").unwrap(),
            "https://eat.example.com/menu/table/abc/table_1"
        );
    }

    #[test]
    fn test_odd_restaurant_ids_survive_the_round_trip() {
        let qr = QrPayload {
            restaurant_id: RestaurantId::from("a b/c?d%"),
            table_id: TableId(3),
        };
        let url = qr.to_url("https://eat.example.com").unwrap();
        assert_eq!(url.matches('/').count(), 5, "{url}");
        assert_eq!(QrPayload::parse(&url).unwrap(), qr);
        assert_eq!(Route::parse(&qr.route().path()), Some(qr.route()));
    }

    #[test]
    fn test_bad_base_url_is_validation_error() {
        let qr = QrPayload {
            restaurant_id: RestaurantId::from("abc"),
            table_id: TableId(1),
        };
        for base in ["", "localhost", "mailto:owner@example.com"] {
            assert!(
                matches!(qr.to_url(base), Err(RouteError::Validation(_))),
                "{base}"
            );
        }
    }

    #[test]
    fn test_malformed_qr_is_validation_error() {
        for scanned in [
            "",
            "not a url",
            "https://x.com/",
            "https://x.com/menu/r1/table_1",
            "https://x.com/table/r1",
            "https://x.com/table/r1/seven",
        ] {
            assert!(
                matches!(QrPayload::parse(scanned), Err(RouteError::Validation(_))),
                "{scanned}"
            );
        }
    }
}
