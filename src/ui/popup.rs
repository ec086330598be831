/// Popup UI: trigger a capture and inspect the last result

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;
use crate::chrome::{inject_into_active_tab, ChromeStorage};
use crate::storage::{load_extraction, StoredExtraction};
use crate::ui::components::{CaptureSummary, OutputPanel};
use crate::ui::output::{initial_text, view_text};

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Loading(String),
    Error(String),
}

impl AppState {
    /// Only an in-flight extraction disables the buttons; after an error
    /// both actions stay available.
    fn is_busy(&self) -> bool {
        matches!(self, AppState::Loading(_))
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Idle);
    let output = use_state(|| None::<String>);
    let captured_at = use_state(|| None::<String>);

    // Show any stored capture on open
    {
        let output = output.clone();
        let captured_at = captured_at.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_extraction(&ChromeStorage).await {
                    Ok(stored) => {
                        if let Some(text) = initial_text(&stored) {
                            output.set(Some(text));
                            captured_at.set(stored.last_extracted_time);
                        }
                    }
                    Err(e) => log::warn!("Could not read stored capture: {}", e),
                }
            });
            || ()
        });
    }

    // Extract & Redirect handler
    let on_extract = {
        let state = state.clone();

        Callback::from(move |_| {
            let state = state.clone();

            state.set(AppState::Loading("Extracting page...".to_string()));

            spawn_local(async move {
                match inject_into_active_tab().await {
                    Ok(_) => state.set(AppState::Idle),
                    Err(e) => state.set(AppState::Error(format!("Extraction failed: {}", e))),
                }
            });
        })
    };

    // View Data handler
    let on_view = {
        let state = state.clone();
        let output = output.clone();
        let captured_at = captured_at.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let output = output.clone();
            let captured_at = captured_at.clone();

            spawn_local(async move {
                match load_extraction(&ChromeStorage).await {
                    Ok(stored) => {
                        state.set(AppState::Idle);
                        show_stored(&stored, &output, &captured_at);
                    }
                    Err(e) => state.set(AppState::Error(format!("Failed to load: {}", e))),
                }
            });
        })
    };

    let is_busy = state.is_busy();

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Page Capture"}</h1>

            <div class="flex-column-gap">
                <Button onclick={on_extract} disabled={is_busy} variant={ButtonVariant::Primary} block={true}>
                    {"Extract & Redirect"}
                </Button>
                <Button onclick={on_view} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                    {"View Data"}
                </Button>
            </div>

            // Status display
            {match &*state {
                AppState::Loading(msg) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            if let Some(time) = (*captured_at).clone() {
                <CaptureSummary captured_at={time} />
            }
            <OutputPanel text={(*output).clone().map(AttrValue::from)} />
        </div>
    }
}

fn show_stored(
    stored: &StoredExtraction,
    output: &UseStateHandle<Option<String>>,
    captured_at: &UseStateHandle<Option<String>>,
) {
    output.set(Some(view_text(stored)));
    captured_at.set(stored.last_extracted_time.clone());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_loading_is_busy() {
        assert!(AppState::Loading("Extracting page...".to_string()).is_busy());
        assert!(!AppState::Idle.is_busy());
        assert!(!AppState::Error("Extraction failed: No active tab".to_string()).is_busy());
    }
}
