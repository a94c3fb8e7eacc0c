use common::{format_inr, OverviewSummary};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api_client::analytics::get_overview;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::components::clock::Clock;
use crate::components::layout::layout::Layout;
use crate::components::stat_card::StatCard;
use crate::router::Route;

/// Renders an optional forecast figure, `-` while no forecast is available.
fn or_dash(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn overview_cards(overview: &OverviewSummary) -> Html {
    let forecast_note = if overview.predicted_demand.is_some() {
        "From the demand forecast"
    } else {
        "Forecast service unavailable"
    };

    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
            <StatCard title="Predicted demand" value={or_dash(overview.predicted_demand)} description={AttrValue::from(forecast_note)} />
            <StatCard title="Recommended servings" value={or_dash(overview.recommended_servings)} />
            <StatCard title="Orders today" value={overview.total_orders.to_string()} description={AttrValue::from(format!("{} servings", overview.servings_today))} />
            <StatCard title="Revenue today" value={format_inr(overview.revenue_today)} value_class={AttrValue::from("text-success")} />
            <StatCard title="Completed" value={overview.status_counts.completed.to_string()} value_class={AttrValue::from("text-success")} />
            <StatCard title="Pending" value={overview.status_counts.pending.to_string()} value_class={AttrValue::from("text-warning")} />
            <StatCard title="Surplus" value={or_dash(overview.surplus)} description={AttrValue::from("Planned servings not yet ordered")} />
            <StatCard title="Shortage" value={or_dash(overview.shortage)} value_class={AttrValue::from("text-error")} description={AttrValue::from("Orders beyond the plan")} />
        </div>
    }
}

#[function_component(OverviewPage)]
pub fn overview_page() -> Html {
    let (fetch_state, refetch) = use_fetch_with_refetch(get_overview);

    let render = Callback::from(|overview: OverviewSummary| overview_cards(&overview));
    let on_refresh = {
        let refetch = refetch.clone();
        Callback::from(move |_| refetch.emit(()))
    };

    html! {
        <Layout title="Overview" on_refresh={Some(on_refresh)}>
            <div class="flex flex-col gap-6">
                <div>
                    <h2 class="text-2xl font-semibold">{"Canteen Overview"}</h2>
                    <p class="text-sm text-gray-500">{"Today's operations, demand and order progress at a glance."}</p>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <div class="card bg-base-100 shadow"><Clock /></div>
                    <div class="card bg-base-100 shadow">
                        <div class="card-body grid grid-cols-2 gap-2">
                            <Link<Route> to={Route::Orders} classes="btn btn-outline"><i class="fas fa-receipt"></i>{" Orders"}</Link<Route>>
                            <Link<Route> to={Route::Menu} classes="btn btn-outline"><i class="fas fa-book-open"></i>{" Menu"}</Link<Route>>
                            <Link<Route> to={Route::Stock} classes="btn btn-outline"><i class="fas fa-boxes"></i>{" Stock"}</Link<Route>>
                            <Link<Route> to={Route::Suggestions} classes="btn btn-outline"><i class="fas fa-lightbulb"></i>{" Suggestions"}</Link<Route>>
                        </div>
                    </div>
                </div>

                <FetchRender<OverviewSummary>
                    state={(*fetch_state).clone()}
                    {render}
                    on_retry={Some(refetch)}
                    loading_text={Some("Loading today's overview...".to_string())}
                />
            </div>
        </Layout>
    }
}
