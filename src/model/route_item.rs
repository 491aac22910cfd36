//! Route item: the routing facts extracted from a request or parameter set.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Named routing parameters of a route item.
pub type RouteAttributes = BTreeMap<String, Value>;

/// Immutable routing facts, built once per resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteItem {
    #[serde(rename = "type")]
    route_type: String,
    locale_fragment: String,
    route_attributes: RouteAttributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    route_name: Option<String>,
}

impl RouteItem {
    pub fn new(
        route_type: impl Into<String>,
        locale_fragment: impl Into<String>,
        route_attributes: RouteAttributes,
    ) -> Self {
        Self {
            route_type: route_type.into(),
            locale_fragment: locale_fragment.into(),
            route_attributes,
            host: None,
            route_name: None,
        }
    }

    /// Attach the host the route was requested on.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_route_name(mut self, route_name: impl Into<String>) -> Self {
        self.route_name = Some(route_name.into());
        self
    }

    /// Discriminator selecting the path generator and zone logic.
    pub fn route_type(&self) -> &str {
        &self.route_type
    }

    /// Raw locale token; empty when the route carries no locale.
    pub fn locale_fragment(&self) -> &str {
        &self.locale_fragment
    }

    pub fn route_attributes(&self) -> &RouteAttributes {
        &self.route_attributes
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn route_name(&self) -> Option<&str> {
        self.route_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_item_accessors() {
        let mut attributes = RouteAttributes::new();
        attributes.insert("path".to_string(), json!("/about"));

        let item = RouteItem::new("route", "de_AT", attributes)
            .with_host("example.at")
            .with_route_name("about");

        assert_eq!(item.route_type(), "route");
        assert_eq!(item.locale_fragment(), "de_AT");
        assert_eq!(item.route_attributes()["path"], json!("/about"));
        assert_eq!(item.host(), Some("example.at"));
        assert_eq!(item.route_name(), Some("about"));
    }

    #[test]
    fn test_route_item_serializes_type_key() {
        let item = RouteItem::new("document", "", RouteAttributes::new());
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["type"], json!("document"));
        assert_eq!(value["localeFragment"], json!(""));
        assert!(value.get("host").is_none());
    }
}
