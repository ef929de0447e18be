//! Loading indicator

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SpinnerProps {
    /// Optional caption rendered under the indicator.
    #[prop_or_default]
    pub label: Option<AttrValue>,
}

#[function_component(Spinner)]
pub fn spinner(props: &SpinnerProps) -> Html {
    html! {
        <div class="flex flex-col items-center justify-center py-12" role="status">
            <span class="h-8 w-8 rounded-full border-2 border-slate-200 border-t-slate-600 animate-spin"></span>
            if let Some(label) = &props.label {
                <span class="mt-3 text-sm text-slate-500">{label}</span>
            }
        </div>
    }
}
