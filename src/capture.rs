/// One activation: extract, persist, route
use crate::error::Result;
use crate::extractor::ExtractionResult;
use crate::messaging::{ExtensionMessage, MessageSink};
use crate::page_node::PageNode;
use crate::router::{route_for_address, RouteDecision};
use crate::storage::{save_extraction, save_site_context, KeyValueStore};

/// Everything decided by a single synchronous pass over the page
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub result: ExtractionResult,
    pub route: RouteDecision,
}

/// Walk the page once and classify its address. Runs to completion.
pub fn capture(root: &PageNode, address: &str, captured_at: &str) -> Capture {
    let result = ExtractionResult::capture(root, address, captured_at);
    let route = route_for_address(address);

    log::debug!(
        "Captured {} chars from {} (context: {:?})",
        result.text.len(),
        address,
        route.context_update.as_ref().map(|u| u.site_context)
    );

    Capture { result, route }
}

/// Apply a capture: store the text, store the site context, request the
/// redirect tab. Every step is attempted even if an earlier one fails; the
/// first error is returned.
pub async fn commit<S, M>(capture: Capture, store: &S, sink: &M) -> Result<()>
where
    S: KeyValueStore,
    M: MessageSink,
{
    let Capture { result, route } = capture;
    let mut first_error = None;

    if let Err(e) = save_extraction(store, &result).await {
        log::error!("Failed to store extraction: {}", e);
        first_error.get_or_insert(e);
    }

    if let Some(update) = &route.context_update {
        if let Err(e) = save_site_context(store, update).await {
            log::error!("Failed to store site context: {}", e);
            first_error.get_or_insert(e);
        }
    }

    if let Some(request) = route.redirect {
        log::info!("Requesting redirect to {}", request.url);
        if let Err(e) = sink.send(ExtensionMessage::OpenNewTab(request)) {
            log::error!("Failed to request redirect: {}", e);
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CIGNA_LOGIN_URL;
    use crate::error::ExtensionError;
    use crate::messaging::{channel, OpenTabRequest};
    use crate::router::SiteContext;
    use crate::storage::{load_extraction, load_site_context, MemoryStore};
    use futures::executor::block_on;
    use futures::StreamExt;
    use serde_json::{Map, Value};

    const NOW: &str = "2026-10-16T12:00:00.000Z";

    fn benefits_page() -> PageNode {
        PageNode::element(
            "body",
            vec![
                PageNode::element("h2", vec![PageNode::text("Eligibility")]),
                PageNode::element("p", vec![PageNode::text("Subscriber ID: 123")]),
            ],
        )
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        async fn get_items(&self, _keys: &[&str]) -> Result<Map<String, Value>> {
            Err(ExtensionError::Storage("quota exceeded".to_string()))
        }

        async fn set_items(&self, _items: Map<String, Value>) -> Result<()> {
            Err(ExtensionError::Storage("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_eligibility_capture_persists_and_redirects() {
        let store = MemoryStore::new();
        let (sender, receiver) = channel();
        let address = "https://eligibility.carestackqa.com/patients/42";

        let captured = capture(&benefits_page(), address, NOW);
        block_on(commit(captured, &store, &sender)).unwrap();

        let stored = block_on(load_extraction(&store)).unwrap();
        assert_eq!(
            stored.cleaned_text.as_deref(),
            Some("\n\n🔹 Eligibility 🔹\nSubscriber ID: 123\n")
        );
        assert_eq!(stored.last_extracted_url.as_deref(), Some(address));
        assert_eq!(stored.last_extracted_time.as_deref(), Some(NOW));

        let context = block_on(load_site_context(&store)).unwrap();
        assert_eq!(context.site_context, Some(SiteContext::Eligibility));
        assert_eq!(context.original_url.as_deref(), Some(address));

        drop(sender);
        let messages: Vec<ExtensionMessage> = block_on(receiver.collect());
        assert_eq!(
            messages,
            vec![ExtensionMessage::OpenNewTab(OpenTabRequest {
                url: CIGNA_LOGIN_URL.to_string()
            })]
        );
    }

    #[test]
    fn test_unmatched_capture_only_persists_text() {
        let store = MemoryStore::new();
        let (sender, receiver) = channel();

        let captured = capture(&benefits_page(), "https://example.com", NOW);
        block_on(commit(captured, &store, &sender)).unwrap();

        assert_eq!(store.len(), 3);
        drop(sender);
        assert!(block_on(receiver.collect::<Vec<_>>()).is_empty());
    }

    #[test]
    fn test_empty_page_still_written() {
        let store = MemoryStore::new();
        let (sender, _receiver) = channel();

        let captured = capture(&PageNode::element("body", vec![]), "https://example.com", NOW);
        assert_eq!(captured.result.text, "");
        block_on(commit(captured, &store, &sender)).unwrap();

        let stored = block_on(load_extraction(&store)).unwrap();
        assert_eq!(stored.cleaned_text, Some(String::new()));
    }

    #[test]
    fn test_redirect_sent_when_storage_fails() {
        let (sender, receiver) = channel();

        let captured = capture(&benefits_page(), "https://eligibility.carestackqa.com/", NOW);
        let result = block_on(commit(captured, &BrokenStore, &sender));

        assert!(matches!(result, Err(ExtensionError::Storage(_))));
        drop(sender);
        assert_eq!(block_on(receiver.collect::<Vec<_>>()).len(), 1);
    }
}
