use common::{CategoryRevenue, DailyPoint, DemandComparison, HourlyPoint, StatusCounts};
use plotly::common::{Marker, Mode};
use plotly::layout::{BarMode, Layout, Margin};
use plotly::{Bar, Plot, Scatter};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

const PRIMARY: &str = "rgb(59, 130, 246)";
const ACCENT: &str = "rgb(251, 146, 60)";
const SUCCESS: &str = "rgb(34, 197, 94)";

fn base_layout() -> Layout {
    Layout::new()
        .height(300)
        .margin(Margin::new().top(10).right(10).left(50).bottom(40))
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

pub fn daily_orders_plot(points: &[DailyPoint]) -> Plot {
    let labels: Vec<String> = points.iter().map(|p| p.label.clone()).collect();
    let orders: Vec<u64> = points.iter().map(|p| p.orders).collect();

    let mut plot = Plot::new();
    plot.add_trace(Bar::new(labels, orders).name("Orders").marker(Marker::new().color(PRIMARY)));
    plot.set_layout(base_layout());
    plot
}

pub fn daily_revenue_plot(points: &[DailyPoint]) -> Plot {
    let labels: Vec<String> = points.iter().map(|p| p.label.clone()).collect();
    let revenue: Vec<f64> = points.iter().map(|p| to_f64(p.revenue)).collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(labels, revenue)
            .mode(Mode::LinesMarkers)
            .name("Revenue")
            .line(plotly::common::Line::new().color(SUCCESS).width(2.0)),
    );
    plot.set_layout(base_layout());
    plot
}

pub fn hourly_orders_plot(points: &[HourlyPoint]) -> Plot {
    let hours: Vec<String> = points.iter().map(|p| format!("{:02}:00", p.hour)).collect();
    let orders: Vec<u64> = points.iter().map(|p| p.orders).collect();

    let mut plot = Plot::new();
    plot.add_trace(Bar::new(hours, orders).name("Orders").marker(Marker::new().color(ACCENT)));
    plot.set_layout(base_layout());
    plot
}

pub fn category_revenue_plot(categories: &[CategoryRevenue]) -> Plot {
    let names: Vec<String> = categories.iter().map(|c| c.category.clone()).collect();
    let revenue: Vec<f64> = categories.iter().map(|c| to_f64(c.revenue)).collect();

    let mut plot = Plot::new();
    plot.add_trace(Bar::new(names, revenue).name("Revenue").marker(Marker::new().color(SUCCESS)));
    plot.set_layout(base_layout());
    plot
}

pub fn status_plot(counts: &StatusCounts) -> Plot {
    let labels = vec!["Pending", "Preparing", "Ready", "Completed"];
    let values = vec![counts.pending, counts.preparing, counts.ready, counts.completed];

    let mut plot = Plot::new();
    plot.add_trace(Bar::new(labels, values).name("Orders").marker(Marker::new().color(PRIMARY)));
    plot.set_layout(base_layout());
    plot
}

/// Predicted, recommended and sold servings per forecast dish, side by side.
pub fn demand_plot(comparisons: &[DemandComparison]) -> Plot {
    let dishes: Vec<String> = comparisons.iter().map(|c| c.dish.clone()).collect();
    let predicted: Vec<i64> = comparisons.iter().map(|c| c.predicted).collect();
    let recommended: Vec<i64> = comparisons.iter().map(|c| c.recommended_servings).collect();
    let sold: Vec<i64> = comparisons
        .iter()
        .map(|c| c.sold_today.map(i64::from).unwrap_or(0))
        .collect();

    let mut plot = Plot::new();
    plot.add_trace(Bar::new(dishes.clone(), predicted).name("Predicted").marker(Marker::new().color(PRIMARY)));
    plot.add_trace(Bar::new(dishes.clone(), recommended).name("Recommended").marker(Marker::new().color(ACCENT)));
    plot.add_trace(Bar::new(dishes, sold).name("Sold today").marker(Marker::new().color(SUCCESS)));
    plot.set_layout(base_layout().bar_mode(BarMode::Group));
    plot
}

fn draw(div_id: &str, plot_json: &str) -> Result<(), JsValue> {
    let spec = js_sys::JSON::parse(plot_json)?;
    let data = js_sys::Reflect::get(&spec, &JsValue::from_str("data"))?;
    let layout = js_sys::Reflect::get(&spec, &JsValue::from_str("layout"))?;
    let config = js_sys::JSON::parse(r#"{"responsive":true,"displayModeBar":false}"#)?;
    newPlot(div_id, data, layout, config);
    Ok(())
}

#[derive(Properties, PartialEq)]
pub struct ChartProps {
    pub id: AttrValue,
    pub title: AttrValue,
    /// Serialized plotly figure, from `Plot::to_json`
    pub plot: AttrValue,
}

#[function_component(Chart)]
pub fn chart(props: &ChartProps) -> Html {
    use_effect_with((props.id.clone(), props.plot.clone()), |(id, plot)| {
        if let Err(e) = draw(id, plot) {
            log::error!("Failed to draw chart {}: {:?}", id, e);
        }
        || ()
    });

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title text-lg">{ &props.title }</h3>
                <div id={props.id.clone()} style="width:100%; height:300px;"></div>
            </div>
        </div>
    }
}
