//! Redirectors: decide where a request without a locale should be sent.
//!
//! Redirectors run as a chain in registry order. The first one that returns a
//! target wins; the rest are never consulted.

use crate::adapter::{Adapter, AdapterIdentity};
use crate::model::{I18nZone, ZoneSite};
use crate::registry::RedirectorRegistry;
use serde::Serialize;
use tracing::{debug, info};

/// Inputs available to every redirector.
#[derive(Debug)]
pub struct RedirectorBag<'a> {
    zone: &'a dyn I18nZone,
    accept_languages: Vec<String>,
}

impl<'a> RedirectorBag<'a> {
    pub fn new(zone: &'a dyn I18nZone) -> Self {
        Self {
            zone,
            accept_languages: Vec::new(),
        }
    }

    /// Attach the client's `Accept-Language` header.
    pub fn with_accept_language(mut self, header: &str) -> Self {
        self.accept_languages = parse_accept_language(header);
        self
    }

    pub fn zone(&self) -> &dyn I18nZone {
        self.zone
    }

    /// Accepted language tags, best first, normalized to `lang` or `lang_country`.
    pub fn accept_languages(&self) -> &[String] {
        &self.accept_languages
    }
}

/// Where a single redirector wants to send the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub url: String,
    pub locale: String,
}

/// The chain's final answer, tagged with the deciding adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectorDecision {
    pub url: String,
    pub locale: String,
    pub redirector: String,
}

pub trait Redirector: Adapter {
    fn make_decision(&self, bag: &RedirectorBag<'_>) -> Option<RedirectTarget>;
}

/// Runs registered redirectors in registration order.
pub struct RedirectorChain<'r> {
    registry: &'r RedirectorRegistry,
}

impl<'r> RedirectorChain<'r> {
    pub fn new(registry: &'r RedirectorRegistry) -> Self {
        Self { registry }
    }

    pub fn run(&self, bag: &RedirectorBag<'_>) -> Option<RedirectorDecision> {
        for redirector in self.registry.iter() {
            let name = redirector.name().unwrap_or("anonymous");
            match redirector.make_decision(bag) {
                Some(target) => {
                    info!("Redirector {} decided on {}", name, target.url);
                    return Some(RedirectorDecision {
                        url: target.url,
                        locale: target.locale,
                        redirector: name.to_string(),
                    });
                }
                None => debug!("Redirector {} made no decision", name),
            }
        }
        None
    }
}

/// Parse an `Accept-Language` header into tags ordered by quality.
///
/// `de-AT,de;q=0.9,en;q=0.5` becomes `["de_at", "de", "en"]`. Entries with
/// `q=0`, wildcards and unparsable weights are dropped.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut weighted: Vec<(f32, String)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.trim().split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let quality = match parts.find_map(|p| p.trim().strip_prefix("q=")) {
                Some(q) => q.trim().parse::<f32>().ok()?,
                None => 1.0,
            };
            if quality <= 0.0 {
                return None;
            }
            Some((quality, tag.replace('-', "_").to_lowercase()))
        })
        .collect();

    // stable: equal weights keep header order
    weighted.sort_by(|a, b| b.0.total_cmp(&a.0));
    weighted.into_iter().map(|(_, tag)| tag).collect()
}

fn site_target(site: &ZoneSite) -> Option<RedirectTarget> {
    let host_url = site.host_url()?;
    Some(RedirectTarget {
        url: format!("{}{}", host_url, site.locale_url_mapping().unwrap_or_default()),
        locale: site.locale().to_string(),
    })
}

/// Built-in redirector registered as `lang`.
///
/// Matches the client's accepted languages against the zone's sites: an exact
/// locale match first, then a language match.
#[derive(Debug, Default)]
pub struct LanguageRedirector {
    identity: AdapterIdentity,
}

impl LanguageRedirector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Adapter for LanguageRedirector {
    fn identity(&self) -> &AdapterIdentity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut AdapterIdentity {
        &mut self.identity
    }
}

impl Redirector for LanguageRedirector {
    fn make_decision(&self, bag: &RedirectorBag<'_>) -> Option<RedirectTarget> {
        let sites = bag.zone().sites();

        for accepted in bag.accept_languages() {
            let language = accepted.split('_').next().unwrap_or_default();

            let exact = sites
                .iter()
                .find(|site| site.locale().to_lowercase() == *accepted);
            let by_language = || {
                sites
                    .iter()
                    .find(|site| site.language_iso().map(str::to_lowercase).as_deref() == Some(language))
            };

            if let Some(target) = exact.or_else(by_language).and_then(site_target) {
                return Some(target);
            }
        }
        None
    }
}

/// Built-in redirector registered as `fallback`.
///
/// Sends the request to the site serving the configured `locale`, else to the
/// zone's root site, else to the first site.
#[derive(Debug, Default)]
pub struct FallbackRedirector {
    identity: AdapterIdentity,
}

impl FallbackRedirector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Adapter for FallbackRedirector {
    fn identity(&self) -> &AdapterIdentity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut AdapterIdentity {
        &mut self.identity
    }
}

impl Redirector for FallbackRedirector {
    fn make_decision(&self, bag: &RedirectorBag<'_>) -> Option<RedirectTarget> {
        let sites = bag.zone().sites();

        let configured = self
            .identity
            .config_str("locale")
            .and_then(|locale| sites.iter().find(|site| site.locale() == locale));

        configured
            .or_else(|| sites.iter().find(|site| site.is_root_domain()))
            .or_else(|| sites.first())
            .and_then(site_target)
    }
}
