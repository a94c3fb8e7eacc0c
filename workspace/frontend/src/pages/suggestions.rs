use chrono::NaiveDate;
use common::{Confidence, DemandComparison, ForecastView, SuggestionSet};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::api_client::analytics::{get_forecast, get_suggestions};
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::components::charts::{demand_plot, Chart};
use crate::components::layout::layout::Layout;
use crate::components::stat_card::StatCard;
use crate::hooks::{use_liveness, FetchState};

fn confidence_badge(confidence: Confidence) -> (&'static str, &'static str) {
    match confidence {
        Confidence::High => ("badge badge-success", "high"),
        Confidence::Medium => ("badge badge-warning", "medium"),
        Confidence::Low => ("badge badge-error", "low"),
    }
}

/// Signed gap between what was sold and what the forecast recommends.
fn demand_gap(comparison: &DemandComparison) -> Option<i64> {
    comparison
        .sold_today
        .map(|sold| i64::from(sold) - comparison.recommended_servings)
}

fn comparison_table(comparisons: &[DemandComparison]) -> Html {
    html! {
        <table class="table table-zebra">
            <thead>
                <tr>
                    <th>{"Dish"}</th><th class="text-right">{"Predicted"}</th><th class="text-right">{"Recommended"}</th>
                    <th class="text-right">{"Sold today"}</th><th class="text-right">{"Gap"}</th><th>{"Confidence"}</th>
                </tr>
            </thead>
            <tbody>
                {for comparisons.iter().map(|row| {
                    let (badge, label) = confidence_badge(row.confidence);
                    let gap = demand_gap(row);
                    html! {
                        <tr key={row.dish.clone()}>
                            <td class="font-medium">
                                { &row.dish }
                                if row.menu_id.is_none() {
                                    <span class="badge badge-ghost badge-sm ml-2">{"not on menu"}</span>
                                }
                            </td>
                            <td class="text-right">{ row.predicted }</td>
                            <td class="text-right">{ row.recommended_servings }</td>
                            <td class="text-right">{ row.sold_today.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()) }</td>
                            <td class={classes!("text-right", gap.filter(|g| *g < 0).map(|_| "text-warning"))}>
                                { gap.map(|g| format!("{:+}", g)).unwrap_or_else(|| "-".to_string()) }
                            </td>
                            <td><span class={badge}>{ label }</span></td>
                        </tr>
                    }
                })}
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq)]
struct ForecastSectionProps {
    view: ForecastView,
    on_select: Callback<NaiveDate>,
}

#[function_component(ForecastSection)]
fn forecast_section(props: &ForecastSectionProps) -> Html {
    let view = &props.view;
    let Some(selected) = view.selected_date else {
        return html! {
            <div class="alert alert-info"><span>{"The forecast service has no predictions yet."}</span></div>
        };
    };

    let onchange = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match NaiveDate::parse_from_str(&select.value(), "%Y-%m-%d") {
                Ok(date) => on_select.emit(date),
                Err(err) => log::warn!("Ignoring forecast date {}: {}", select.value(), err),
            }
        })
    };

    html! {
        <div class="flex flex-col gap-4">
            <label class="form-control w-full max-w-xs">
                <span class="label-text">{"Forecast date"}</span>
                <select class="select select-bordered select-sm" {onchange}>
                    {for view.available_dates.iter().map(|date| html! {
                        <option value={date.format("%Y-%m-%d").to_string()} selected={*date == selected}>
                            { date.format("%a, %d %b %Y").to_string() }
                        </option>
                    })}
                </select>
            </label>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <StatCard title="Predicted demand" value={view.total_predicted.to_string()} />
                <StatCard title="Recommended servings" value={view.total_recommended.to_string()} value_class={AttrValue::from("text-primary")} />
                <StatCard title="Dishes forecast" value={view.entries.len().to_string()} />
            </div>

            <Chart id="chart-demand" title="Forecast vs sales" plot={demand_plot(&view.comparisons).to_json()} />
            <div class="overflow-x-auto">{ comparison_table(&view.comparisons) }</div>
        </div>
    }
}

fn suggestion_card(title: &'static str, icon: &'static str, tips: &[String]) -> Html {
    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title text-lg"><i class={icon}></i>{ title }</h3>
                if tips.is_empty() {
                    <p class="text-sm text-gray-500">{"Nothing to suggest."}</p>
                } else {
                    <ul class="list-disc list-inside space-y-1">
                        {for tips.iter().map(|tip| html! { <li>{ tip }</li> })}
                    </ul>
                }
            </div>
        </div>
    }
}

fn suggestion_cards(suggestions: &SuggestionSet) -> Html {
    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            { suggestion_card("Key actions", "fas fa-bolt mr-2", &suggestions.key_actions) }
            { suggestion_card("Waste reduction", "fas fa-recycle mr-2", &suggestions.waste_reduction) }
            { suggestion_card("Next day menu", "fas fa-utensils mr-2", &suggestions.next_day_menu) }
            { suggestion_card("Operational tips", "fas fa-clipboard-check mr-2", &suggestions.operational_tips) }
        </div>
    }
}

/// Demand forecast for a chosen date plus generated operational suggestions.
#[function_component(SuggestionsPage)]
pub fn suggestions_page() -> Html {
    let selected = use_state(|| None::<NaiveDate>);
    let forecast = use_state(|| FetchState::<ForecastView>::Loading);
    let liveness = use_liveness();
    let (suggestions, regenerate) = use_fetch_with_refetch(get_suggestions);

    {
        let forecast = forecast.clone();
        use_effect_with(*selected, move |date| {
            let date = *date;
            forecast.set(FetchState::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                let result = get_forecast(date).await;
                if !liveness.is_alive() {
                    return;
                }
                forecast.set(match result {
                    Ok(view) => FetchState::Success(view),
                    Err(err) => FetchState::Error(err),
                });
            });
            || ()
        });
    }

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |date: NaiveDate| selected.set(Some(date)))
    };

    let on_regenerate = {
        let regenerate = regenerate.clone();
        Callback::from(move |_| regenerate.emit(()))
    };

    html! {
        <Layout title="Suggestions">
            <div class="flex flex-col gap-6">
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title text-lg">{"Demand forecast"}</h3>
                        <FetchRender<ForecastView>
                            state={(*forecast).clone()}
                            render={Callback::from(move |view: ForecastView| html! {
                                <ForecastSection {view} on_select={on_select.clone()} />
                            })}
                            loading_text={Some("Fetching forecast...".to_string())}
                        />
                    </div>
                </div>

                <div class="flex items-center justify-between">
                    <h3 class="text-xl font-semibold">{"Suggestions"}</h3>
                    <button class="btn btn-primary btn-sm" onclick={on_regenerate} disabled={suggestions.is_loading()}>
                        <i class="fas fa-sync-alt"></i>{" Regenerate"}
                    </button>
                </div>
                <FetchRender<SuggestionSet>
                    state={(*suggestions).clone()}
                    render={Callback::from(|set: SuggestionSet| suggestion_cards(&set))}
                    on_retry={Some(regenerate)}
                    loading_text={Some("Generating suggestions...".to_string())}
                />
            </div>
        </Layout>
    }
}
