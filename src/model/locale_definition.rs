//! Locale definition: the language/country split of a resolved locale.

use crate::definitions::INTERNATIONAL_COUNTRY_NAMESPACE;
use serde::Serialize;

/// Immutable description of a resolved locale.
///
/// `country_iso` is never empty: it holds either a real ISO code or
/// [`INTERNATIONAL_COUNTRY_NAMESPACE`]. When `locale` is absent,
/// `language_iso` is absent too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleDefinition {
    locale: Option<String>,
    language_iso: Option<String>,
    country_iso: String,
}

impl LocaleDefinition {
    /// Parse a raw locale fragment such as `"de"`, `"de_at"` or `""`.
    ///
    /// Total and pure: every input maps to a definition.
    /// - `""` yields no locale and no language.
    /// - A fragment without `_` is taken as the language verbatim.
    /// - `lang_country` lower-cases the language and upper-cases the country;
    ///   an empty country keeps the international namespace.
    /// - Segments after the second `_` are ignored.
    pub fn from_fragment(fragment: &str) -> Self {
        if fragment.is_empty() {
            return Self::international(None, None);
        }

        let Some((language, rest)) = fragment.split_once('_') else {
            return Self::international(Some(fragment.to_string()), Some(fragment.to_string()));
        };

        let country = rest.split('_').next().unwrap_or_default();
        let country_iso = if country.is_empty() {
            INTERNATIONAL_COUNTRY_NAMESPACE.to_string()
        } else {
            country.to_uppercase()
        };

        Self {
            locale: Some(fragment.to_string()),
            language_iso: Some(language.to_lowercase()),
            country_iso,
        }
    }

    fn international(locale: Option<String>, language_iso: Option<String>) -> Self {
        Self {
            locale,
            language_iso,
            country_iso: INTERNATIONAL_COUNTRY_NAMESPACE.to_string(),
        }
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn has_locale(&self) -> bool {
        self.locale.is_some()
    }

    pub fn language_iso(&self) -> Option<&str> {
        self.language_iso.as_deref()
    }

    pub fn has_language_iso(&self) -> bool {
        self.language_iso.is_some()
    }

    pub fn country_iso(&self) -> &str {
        &self.country_iso
    }

    /// True when a real country code was derived.
    pub fn has_country_iso(&self) -> bool {
        !self.is_international()
    }

    pub fn is_international(&self) -> bool {
        self.country_iso == INTERNATIONAL_COUNTRY_NAMESPACE
    }

    /// Language tag suitable for `hreflang` attributes (`de-at`, `de`).
    pub fn hreflang(&self) -> Option<String> {
        let language = self
            .language_iso
            .as_deref()
            .filter(|language| !language.is_empty())?
            .to_lowercase();
        if self.is_international() {
            return Some(language);
        }
        Some(format!("{}-{}", language, self.country_iso.to_lowercase()))
    }
}
