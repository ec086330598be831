/// Text shown in the popup output panel

use crate::storage::StoredExtraction;

pub const NO_DATA_PLACEHOLDER: &str = "No data extracted yet. Use Extract & Redirect first.";

const UNKNOWN_URL: &str = "Unknown";

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Output for the "View Data" button.
/// An empty stored text counts as no data.
pub fn view_text(stored: &StoredExtraction) -> String {
    match non_empty(&stored.cleaned_text) {
        Some(text) => {
            let url = non_empty(&stored.last_extracted_url).unwrap_or(UNKNOWN_URL);
            format!("URL: {}\n\n{}", url, text)
        }
        None => NO_DATA_PLACEHOLDER.to_string(),
    }
}

/// Output when the popup opens: the stored text as-is, if there is any
pub fn initial_text(stored: &StoredExtraction) -> Option<String> {
    non_empty(&stored.cleaned_text).map(str::to_string)
}
