//! Shared constants for locale resolution and adapter registration.

/// Country placeholder used when no country can be derived from a locale.
pub const INTERNATIONAL_COUNTRY_NAMESPACE: &str = "international";

/// Registration tag for locale provider adapters.
pub const LOCALE_PROVIDER_TAG: &str = "i18n.adapter.locale";

/// Registration tag for path generator adapters.
pub const PATH_GENERATOR_TAG: &str = "i18n.adapter.path.generator";

/// Registration tag for redirector adapters.
pub const REDIRECTOR_TAG: &str = "i18n.adapter.redirector";

/// Route type for content documents.
pub const ROUTE_TYPE_DOCUMENT: &str = "document";

/// Route type for statically configured routes.
pub const ROUTE_TYPE_STATIC_ROUTE: &str = "static_route";

/// Route type for plain application routes.
pub const ROUTE_TYPE_ROUTE: &str = "route";

/// Reserved routing parameter carrying the locale fragment.
pub const PARAM_LOCALE: &str = "_locale";

/// Reserved routing parameter carrying the request host.
pub const PARAM_HOST: &str = "_host";

/// Reserved routing parameter carrying the route name.
pub const PARAM_ROUTE: &str = "_route";
