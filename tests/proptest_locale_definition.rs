//! Property tests for locale fragment parsing.

use i18n_context::definitions::INTERNATIONAL_COUNTRY_NAMESPACE;
use i18n_context::LocaleDefinition;
use proptest::prelude::*;

proptest! {
    #[test]
    fn country_is_never_empty(fragment in ".*") {
        let definition = LocaleDefinition::from_fragment(&fragment);
        prop_assert!(!definition.country_iso().is_empty());
    }

    #[test]
    fn parsing_is_deterministic(fragment in "[a-zA-Z_]{0,12}") {
        prop_assert_eq!(
            LocaleDefinition::from_fragment(&fragment),
            LocaleDefinition::from_fragment(&fragment)
        );
    }

    #[test]
    fn locale_presence_tracks_fragment(fragment in "[a-zA-Z_]{0,12}") {
        let definition = LocaleDefinition::from_fragment(&fragment);
        prop_assert_eq!(definition.has_locale(), !fragment.is_empty());
        prop_assert_eq!(definition.locale(), (!fragment.is_empty()).then_some(fragment.as_str()));
        if !definition.has_locale() {
            prop_assert!(!definition.has_language_iso());
        }
    }

    #[test]
    fn single_token_is_kept_verbatim(token in "[a-zA-Z]{1,8}") {
        let definition = LocaleDefinition::from_fragment(&token);
        prop_assert_eq!(definition.language_iso(), Some(token.as_str()));
        prop_assert_eq!(definition.country_iso(), INTERNATIONAL_COUNTRY_NAMESPACE);
    }

    #[test]
    fn language_and_country_are_normalized(
        language in "[a-zA-Z]{2,3}",
        country in "[a-zA-Z]{2}",
        extra in "(_[a-zA-Z]{1,4})?",
    ) {
        let fragment = format!("{}_{}{}", language, country, extra);
        let definition = LocaleDefinition::from_fragment(&fragment);
        let expected_language = language.to_lowercase();
        prop_assert_eq!(definition.language_iso(), Some(expected_language.as_str()));
        prop_assert_eq!(definition.country_iso(), country.to_uppercase());
        prop_assert!(definition.has_country_iso());
    }
}
