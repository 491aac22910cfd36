use crate::builder::{Document, RouteItemBuilder, RouteParameters};
use crate::definitions::{
    PARAM_HOST, PARAM_LOCALE, PARAM_ROUTE, ROUTE_TYPE_DOCUMENT, ROUTE_TYPE_ROUTE,
    ROUTE_TYPE_STATIC_ROUTE,
};
use crate::error::RouteItemError;
use crate::model::{RouteAttributes, RouteItem};
use crate::options::OptionType;
use axum::extract::Query;
use axum::http::header::HOST;
use axum::http::request::Parts;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::sync::OnceLock;

// Leading path segment carrying a locale: /de, /de_AT, /en_gb/...
static LOCALE_PATH_REGEX: OnceLock<Regex> = OnceLock::new();

fn locale_path_regex() -> &'static Regex {
    LOCALE_PATH_REGEX.get_or_init(|| {
        Regex::new(r"^/(?P<locale>[a-zA-Z]{2}(?:_[a-zA-Z]{2})?)(?P<rest>/.*)?$")
            .expect("locale path regex is valid")
    })
}

/// Route item builder for explicit parameters and HTTP requests.
///
/// Parameters use the reserved keys `_locale`, `_host` and `_route`; every
/// other key becomes a route attribute.
#[derive(Debug, Clone)]
pub struct DefaultRouteItemBuilder {
    route_types: BTreeSet<String>,
    // Lower-cased; empty accepts any locale-shaped path segment
    known_locales: BTreeSet<String>,
}

impl DefaultRouteItemBuilder {
    pub fn new() -> Self {
        Self {
            route_types: [ROUTE_TYPE_DOCUMENT, ROUTE_TYPE_STATIC_ROUTE, ROUTE_TYPE_ROUTE]
                .into_iter()
                .map(str::to_string)
                .collect(),
            known_locales: BTreeSet::new(),
        }
    }

    /// Accept an additional route type.
    pub fn with_type(mut self, route_type: impl Into<String>) -> Self {
        self.route_types.insert(route_type.into());
        self
    }

    /// Only treat a leading path segment as a locale when it is one of
    /// `locales` (compared case-insensitively).
    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.known_locales.extend(
            locales
                .into_iter()
                .map(|locale| locale.as_ref().to_lowercase())
                .filter(|locale| !locale.is_empty()),
        );
        self
    }

    fn is_known_locale(&self, locale: &str) -> bool {
        self.known_locales.is_empty() || self.known_locales.contains(&locale.to_lowercase())
    }

    fn reserved_str(
        parameters: &RouteParameters,
        key: &str,
    ) -> Result<Option<String>, RouteItemError> {
        match parameters.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(RouteItemError::InvalidParameter {
                key: key.to_string(),
                reason: format!("expected a string, got {}", OptionType::of(other)),
            }),
        }
    }
}

impl Default for DefaultRouteItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Host the request was sent to, lower-cased and without port.
pub(crate) fn request_host(request: &Parts) -> Option<String> {
    let host = request
        .headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| request.uri.host())?;
    let host = host.split(':').next().unwrap_or_default();
    (!host.is_empty()).then(|| host.to_lowercase())
}

#[derive(Debug, Deserialize)]
struct LocaleQuery {
    #[serde(rename = "_locale")]
    locale: Option<String>,
}

fn query_locale(request: &Parts) -> Option<String> {
    let Query(query) = Query::<LocaleQuery>::try_from_uri(&request.uri).ok()?;
    query.locale.filter(|locale| !locale.is_empty())
}

impl RouteItemBuilder for DefaultRouteItemBuilder {
    fn build_route_item_by_parameters(
        &self,
        route_type: &str,
        parameters: &RouteParameters,
    ) -> Result<RouteItem, RouteItemError> {
        if route_type.is_empty() {
            return Err(RouteItemError::EmptyType);
        }
        if !self.route_types.contains(route_type) {
            return Err(RouteItemError::UnknownType(route_type.to_string()));
        }

        let locale = Self::reserved_str(parameters, PARAM_LOCALE)?.unwrap_or_default();
        let host = Self::reserved_str(parameters, PARAM_HOST)?;
        let route_name = Self::reserved_str(parameters, PARAM_ROUTE)?;

        let attributes: RouteAttributes = parameters
            .iter()
            .filter(|(key, _)| ![PARAM_LOCALE, PARAM_HOST, PARAM_ROUTE].contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let mut item = RouteItem::new(route_type, locale, attributes);
        if let Some(host) = host {
            item = item.with_host(host);
        }
        if let Some(route_name) = route_name {
            item = item.with_route_name(route_name);
        }
        Ok(item)
    }

    fn build_route_item_by_request(
        &self,
        request: &Parts,
        document: Option<&Document>,
    ) -> Option<RouteItem> {
        let path = request.uri.path();

        let item = if let Some(document) = document {
            let mut attributes = RouteAttributes::new();
            attributes.insert("document_id".to_string(), json!(document.id));
            attributes.insert("path".to_string(), json!(document.path));
            RouteItem::new(
                ROUTE_TYPE_DOCUMENT,
                document.locale.clone().unwrap_or_default(),
                attributes,
            )
        } else if let Some(captures) = locale_path_regex()
            .captures(path)
            .filter(|captures| self.is_known_locale(&captures["locale"]))
        {
            let rest = captures.name("rest").map(|m| m.as_str()).unwrap_or_default();
            let mut attributes = RouteAttributes::new();
            attributes.insert("path".to_string(), json!(rest));
            RouteItem::new(ROUTE_TYPE_ROUTE, &captures["locale"], attributes)
        } else if let Some(locale) = query_locale(request) {
            let mut attributes = RouteAttributes::new();
            attributes.insert("path".to_string(), json!(path));
            RouteItem::new(ROUTE_TYPE_ROUTE, locale, attributes)
        } else {
            return None;
        };

        Some(match request_host(request) {
            Some(host) => item.with_host(host),
            None => item,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(uri: &str, host: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri(uri);
        if let Some(host) = host {
            builder = builder.header(HOST, host);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn params(value: Value) -> RouteParameters {
        value.as_object().cloned().unwrap()
    }

    // ==================== Parameter Tests ====================

    #[test]
    fn test_parameters_split_reserved_keys_from_attributes() {
        let builder = DefaultRouteItemBuilder::new();
        let item = builder
            .build_route_item_by_parameters(
                "static_route",
                &params(json!({
                    "_locale": "de_AT",
                    "_host": "example.at",
                    "_route": "news_detail",
                    "slug": "hello",
                })),
            )
            .unwrap();

        assert_eq!(item.route_type(), "static_route");
        assert_eq!(item.locale_fragment(), "de_AT");
        assert_eq!(item.host(), Some("example.at"));
        assert_eq!(item.route_name(), Some("news_detail"));
        assert_eq!(item.route_attributes().len(), 1);
        assert_eq!(item.route_attributes()["slug"], json!("hello"));
    }

    #[test]
    fn test_missing_locale_is_empty_fragment() {
        let item = DefaultRouteItemBuilder::new()
            .build_route_item_by_parameters("route", &RouteParameters::new())
            .unwrap();
        assert_eq!(item.locale_fragment(), "");
        assert!(item.route_attributes().is_empty());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = DefaultRouteItemBuilder::new()
            .build_route_item_by_parameters("news", &RouteParameters::new())
            .unwrap_err();
        assert_eq!(err, RouteItemError::UnknownType("news".to_string()));
    }

    #[test]
    fn test_additional_type_is_accepted() {
        let builder = DefaultRouteItemBuilder::new().with_type("news");
        assert!(builder
            .build_route_item_by_parameters("news", &RouteParameters::new())
            .is_ok());
    }

    #[test]
    fn test_empty_type_is_rejected() {
        let err = DefaultRouteItemBuilder::new()
            .build_route_item_by_parameters("", &RouteParameters::new())
            .unwrap_err();
        assert_eq!(err, RouteItemError::EmptyType);
    }

    #[test]
    fn test_non_string_locale_is_rejected() {
        let err = DefaultRouteItemBuilder::new()
            .build_route_item_by_parameters("route", &params(json!({ "_locale": 12 })))
            .unwrap_err();
        assert_eq!(
            err,
            RouteItemError::InvalidParameter {
                key: "_locale".to_string(),
                reason: "expected a string, got int".to_string(),
            }
        );
    }

    // ==================== Request Tests ====================

    #[test]
    fn test_request_with_locale_segment() {
        let item = DefaultRouteItemBuilder::new()
            .build_route_item_by_request(&parts("/de_AT/about/team", Some("Example.AT:8080")), None)
            .unwrap();

        assert_eq!(item.route_type(), "route");
        assert_eq!(item.locale_fragment(), "de_AT");
        assert_eq!(item.route_attributes()["path"], json!("/about/team"));
        assert_eq!(item.host(), Some("example.at"));
    }

    #[test]
    fn test_request_with_bare_locale_segment() {
        let item = DefaultRouteItemBuilder::new()
            .build_route_item_by_request(&parts("/en", None), None)
            .unwrap();

        assert_eq!(item.locale_fragment(), "en");
        assert_eq!(item.route_attributes()["path"], json!(""));
        assert_eq!(item.host(), None);
    }

    #[test]
    fn test_request_with_query_locale() {
        let item = DefaultRouteItemBuilder::new()
            .build_route_item_by_request(&parts("/search?q=x&_locale=fr", None), None)
            .unwrap();

        assert_eq!(item.locale_fragment(), "fr");
        assert_eq!(item.route_attributes()["path"], json!("/search"));
    }

    #[test]
    fn test_request_with_encoded_query_locale() {
        let item = DefaultRouteItemBuilder::new()
            .build_route_item_by_request(&parts("/search?_locale=de%5FAT&q=a%20b", None), None)
            .unwrap();

        assert_eq!(item.locale_fragment(), "de_AT");
        let definition = crate::model::LocaleDefinition::from_fragment(item.locale_fragment());
        assert_eq!(definition.language_iso(), Some("de"));
        assert_eq!(definition.country_iso(), "AT");
    }

    #[test]
    fn test_empty_query_locale_is_ignored() {
        assert!(DefaultRouteItemBuilder::new()
            .build_route_item_by_request(&parts("/search?_locale=", None), None)
            .is_none());
    }

    #[test]
    fn test_known_locales_filter_path_segments() {
        let builder = DefaultRouteItemBuilder::new().with_locales(["de_AT", "en"]);

        assert!(builder
            .build_route_item_by_request(&parts("/js/app.js", None), None)
            .is_none());

        let item = builder
            .build_route_item_by_request(&parts("/de_at/kontakt", None), None)
            .unwrap();
        assert_eq!(item.locale_fragment(), "de_at");

        let item = builder
            .build_route_item_by_request(&parts("/EN", None), None)
            .unwrap();
        assert_eq!(item.locale_fragment(), "EN");
    }

    #[test]
    fn test_request_with_document() {
        let document = Document {
            id: 42,
            path: "/impressum".to_string(),
            locale: Some("de_CH".to_string()),
        };
        let item = DefaultRouteItemBuilder::new()
            .build_route_item_by_request(&parts("/impressum", Some("example.ch")), Some(&document))
            .unwrap();

        assert_eq!(item.route_type(), "document");
        assert_eq!(item.locale_fragment(), "de_CH");
        assert_eq!(item.route_attributes()["document_id"], json!(42));
        assert_eq!(item.host(), Some("example.ch"));
    }

    #[test]
    fn test_request_without_i18n_facts() {
        let builder = DefaultRouteItemBuilder::new();
        assert!(builder
            .build_route_item_by_request(&parts("/", Some("example.com")), None)
            .is_none());
        assert!(builder
            .build_route_item_by_request(&parts("/assets/app.css", None), None)
            .is_none());
    }
}
