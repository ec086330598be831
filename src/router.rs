/// Site routing for the eligibility and Cigna portals
use serde::{Deserialize, Serialize};

use crate::config::{CIGNA_LOGIN_URL, CIGNA_SITE_MARKER, ELIGIBILITY_SITE_MARKER};
use crate::messaging::OpenTabRequest;

/// Which recognized site the last capture ran on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteContext {
    Eligibility,
    Cigna,
}

/// Storage update describing the site context.
/// `originalUrl` is only written when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextUpdate {
    pub site_context: SiteContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteDecision {
    pub context_update: Option<ContextUpdate>,
    pub redirect: Option<OpenTabRequest>,
}

impl RouteDecision {
    pub fn is_noop(&self) -> bool {
        self.context_update.is_none() && self.redirect.is_none()
    }
}

/// Classify a page address.
///
/// Matching is plain substring containment on the whole address, so a
/// marker appearing in a query string also matches. The eligibility marker
/// is checked first.
pub fn route_for_address(address: &str) -> RouteDecision {
    if address.contains(ELIGIBILITY_SITE_MARKER) {
        RouteDecision {
            context_update: Some(ContextUpdate {
                site_context: SiteContext::Eligibility,
                original_url: Some(address.to_string()),
            }),
            redirect: Some(OpenTabRequest {
                url: CIGNA_LOGIN_URL.to_string(),
            }),
        }
    } else if address.contains(CIGNA_SITE_MARKER) {
        RouteDecision {
            context_update: Some(ContextUpdate {
                site_context: SiteContext::Cigna,
                original_url: None,
            }),
            redirect: None,
        }
    } else {
        RouteDecision::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligibility_address() {
        let address = "https://eligibility.carestackqa.com/x";

        let decision = route_for_address(address);

        assert_eq!(
            decision.context_update,
            Some(ContextUpdate {
                site_context: SiteContext::Eligibility,
                original_url: Some(address.to_string()),
            })
        );
        assert_eq!(decision.redirect.unwrap().url, CIGNA_LOGIN_URL);
    }

    #[test]
    fn test_cigna_address() {
        let decision = route_for_address("https://cignaforhcp.cigna.com/app");

        assert_eq!(
            decision.context_update,
            Some(ContextUpdate {
                site_context: SiteContext::Cigna,
                original_url: None,
            })
        );
        assert!(decision.redirect.is_none());
    }

    #[test]
    fn test_login_page_does_not_redirect_again() {
        let decision = route_for_address(CIGNA_LOGIN_URL);

        assert_eq!(
            decision.context_update.map(|u| u.site_context),
            Some(SiteContext::Cigna)
        );
        assert!(decision.redirect.is_none());
    }

    #[test]
    fn test_unmatched_address() {
        let decision = route_for_address("https://example.com");

        assert!(decision.is_noop());
        assert!(route_for_address("").is_noop());
    }

    #[test]
    fn test_marker_in_query_string_matches() {
        let decision = route_for_address("https://example.com/?next=eligibility.carestackqa.com");

        assert_eq!(
            decision.context_update.map(|u| u.site_context),
            Some(SiteContext::Eligibility)
        );
    }

    #[test]
    fn test_context_update_serialization() {
        let eligibility = ContextUpdate {
            site_context: SiteContext::Eligibility,
            original_url: Some("https://eligibility.carestackqa.com/p/1".to_string()),
        };
        let cigna = ContextUpdate {
            site_context: SiteContext::Cigna,
            original_url: None,
        };

        assert_eq!(
            serde_json::to_value(&eligibility).unwrap(),
            serde_json::json!({
                "siteContext": "eligibility",
                "originalUrl": "https://eligibility.carestackqa.com/p/1"
            })
        );
        assert_eq!(
            serde_json::to_value(&cigna).unwrap(),
            serde_json::json!({"siteContext": "cigna"})
        );
        assert!(serde_json::from_str::<SiteContext>(r#""other""#).is_err());
    }
}
