/// Reusable UI components

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct OutputPanelProps {
    #[prop_or_default]
    pub text: Option<AttrValue>,
}

/// Monospace panel holding captured text; renders nothing until there is text
#[function_component(OutputPanel)]
pub fn output_panel(props: &OutputPanelProps) -> Html {
    match &props.text {
        Some(text) => html! {
            <pre class="output-panel">{text.clone()}</pre>
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct CaptureSummaryProps {
    pub captured_at: AttrValue,
}

#[function_component(CaptureSummary)]
pub fn capture_summary(props: &CaptureSummaryProps) -> Html {
    html! {
        <p class="capture-summary">{format!("Captured {}", props.captured_at)}</p>
    }
}
