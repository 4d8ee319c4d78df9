use common::DashboardError;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or_default]
    pub text: Option<AttrValue>,
}

/// Centered spinner shown while the analysis is loading
#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="flex flex-col justify-center items-center py-12 gap-4" role="status">
            <span class="loading loading-spinner loading-lg"></span>
            {if let Some(text) = &props.text {
                html! { <p class="text-sm text-gray-500">{text.clone()}</p> }
            } else {
                html! {}
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FailureProps {
    pub error: DashboardError,
}

fn failure_headline(error: &DashboardError) -> &'static str {
    match error {
        DashboardError::Network(_) => "Could not reach the analysis service",
        DashboardError::Backend(_) => "The analysis service reported an error",
        DashboardError::Parse(_) => "The analysis response could not be read",
        DashboardError::Format { .. } => "Some metrics are missing",
    }
}

/// Failure panel, distinct from the loading state
#[function_component(Failure)]
pub fn failure(props: &FailureProps) -> Html {
    log::warn!("Displaying error to user: {}", props.error);

    html! {
        <div class="flex flex-col items-center justify-center py-12 gap-4">
            <div class="alert alert-error max-w-lg" role="alert" data-error-kind={props.error.kind()}>
                <i class="fas fa-exclamation-circle text-2xl"></i>
                <div class="flex flex-col gap-2">
                    <span class="font-semibold">{failure_headline(&props.error)}</span>
                    <span class="text-sm">{props.error.to_string()}</span>
                </div>
            </div>
        </div>
    }
}
