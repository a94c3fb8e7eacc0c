use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

/// Failed load with the server's message and an optional retry button.
#[function_component(ErrorDisplay)]
pub fn error_display(props: &ErrorDisplayProps) -> Html {
    log::warn!("Showing load error: {}", props.message);

    let retry = props.on_retry.clone().map(|on_retry| {
        Callback::from(move |_: MouseEvent| {
            log::debug!("Retrying failed load");
            on_retry.emit(());
        })
    });

    html! {
        <div class="flex flex-col items-center justify-center py-12 gap-4">
            <div role="alert" class="alert alert-error max-w-lg">
                <i class="fas fa-exclamation-circle text-2xl"></i>
                <div class="flex flex-col gap-1">
                    <span class="font-semibold">{"Could not load this section"}</span>
                    <span class="text-sm">{ &props.message }</span>
                </div>
            </div>
            if let Some(onclick) = retry {
                <button class="btn btn-primary btn-sm" {onclick}>
                    <i class="fas fa-redo"></i>{" Try again"}
                </button>
            }
        </div>
    }
}
