use common::{format_inr, format_quantity, DashboardSummary, DepletedIngredient, TopSellingItem};
use yew::prelude::*;

use crate::api_client::analytics::get_dashboard;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::components::charts::{
    category_revenue_plot, daily_orders_plot, daily_revenue_plot, hourly_orders_plot, status_plot, Chart,
};
use crate::components::layout::layout::Layout;
use crate::components::stat_card::StatCard;

fn top_selling_table(items: &[TopSellingItem]) -> Html {
    html! {
        <table class="table table-zebra">
            <thead>
                <tr><th>{"Item"}</th><th class="text-right">{"Sold today"}</th><th class="text-right">{"Price"}</th><th class="text-right">{"Revenue"}</th></tr>
            </thead>
            <tbody>
                {for items.iter().map(|item| html! {
                    <tr key={item.menu_id}>
                        <td>{ &item.item }</td>
                        <td class="text-right">{ item.sold_today }</td>
                        <td class="text-right">{ format_inr(item.price) }</td>
                        <td class="text-right font-semibold">{ format_inr(item.revenue) }</td>
                    </tr>
                })}
            </tbody>
        </table>
    }
}

fn top_depleted_table(items: &[DepletedIngredient]) -> Html {
    html! {
        <table class="table table-zebra">
            <thead>
                <tr><th>{"Ingredient"}</th><th class="text-right">{"Used"}</th><th class="text-right">{"Remaining"}</th></tr>
            </thead>
            <tbody>
                {for items.iter().map(|item| html! {
                    <tr key={item.ingredient_id}>
                        <td>{ &item.name }</td>
                        <td class="text-right">{ format_quantity(item.used, item.unit.as_deref()) }</td>
                        <td class="text-right">{ format_quantity(item.remaining, item.unit.as_deref()) }</td>
                    </tr>
                })}
            </tbody>
        </table>
    }
}

fn dashboard_view(summary: &DashboardSummary) -> Html {
    html! {
        <div class="flex flex-col gap-6">
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
                <StatCard title="Orders today" value={summary.orders_today.to_string()} description={AttrValue::from(format!("{} in total", summary.total_orders))} />
                <StatCard title="Revenue today" value={format_inr(summary.revenue_today)} value_class={AttrValue::from("text-success")}
                    description={AttrValue::from(format!("{} in total", format_inr(summary.total_revenue)))} />
                <StatCard title="Profit today" value={format_inr(summary.profit_today)} value_class={AttrValue::from("text-primary")} />
                <StatCard title="Expired stock loss" value={format_inr(summary.expired_loss)} value_class={AttrValue::from("text-error")}
                    description={AttrValue::from(format!("{} expired, {} low on stock", summary.expired_count, summary.low_stock_count))} />
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
                <Chart id="chart-daily-orders" title="Orders, last 7 days" plot={daily_orders_plot(&summary.daily).to_json()} />
                <Chart id="chart-daily-revenue" title="Revenue, last 7 days" plot={daily_revenue_plot(&summary.daily).to_json()} />
                <Chart id="chart-orders-by-hour" title="Orders by hour" plot={hourly_orders_plot(&summary.orders_by_hour).to_json()} />
                <Chart id="chart-category-revenue" title="Revenue by category" plot={category_revenue_plot(&summary.revenue_by_category).to_json()} />
                <Chart id="chart-status" title="Order status" plot={status_plot(&summary.status_counts).to_json()} />
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title text-lg">{"Top selling items"}</h3>
                        { top_selling_table(&summary.top_selling) }
                    </div>
                </div>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title text-lg">{"Most used ingredients"}</h3>
                        { top_depleted_table(&summary.top_depleted) }
                    </div>
                </div>
            </div>
        </div>
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let (fetch_state, refetch) = use_fetch_with_refetch(get_dashboard);

    let on_refresh = {
        let refetch = refetch.clone();
        Callback::from(move |_| refetch.emit(()))
    };

    html! {
        <Layout title="Dashboard" on_refresh={Some(on_refresh)}>
            <FetchRender<DashboardSummary>
                state={(*fetch_state).clone()}
                render={Callback::from(|summary: DashboardSummary| dashboard_view(&summary))}
                on_retry={Some(refetch)}
            />
        </Layout>
    }
}
