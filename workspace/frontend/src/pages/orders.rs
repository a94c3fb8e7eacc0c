use chrono::{Duration, NaiveDateTime};
use common::{format_inr, OrderDto, OrderStatus, Table};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::api_client::orders::{get_orders, update_order_status};
use crate::api_client::realtime::ChangeSubscription;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::common::toast::ToastContext;
use crate::components::layout::layout::Layout;
use crate::hooks::use_liveness;

/// Short order code shown to staff, e.g. `ORD007`.
fn order_code(id: i32) -> String {
    format!("ORD{:03}", id)
}

/// Moves a UTC timestamp onto a wall clock that runs `minutes_behind_utc`
/// minutes behind UTC, the sign convention of `Date.getTimezoneOffset`.
fn local_clock(utc: NaiveDateTime, minutes_behind_utc: i64) -> NaiveDateTime {
    utc - Duration::minutes(minutes_behind_utc)
}

/// Order time as `HH:MM` in the browser's time zone.
fn order_time(created_at: NaiveDateTime) -> String {
    let minutes_behind_utc = js_sys::Date::new_0().get_timezone_offset() as i64;
    local_clock(created_at, minutes_behind_utc).format("%H:%M").to_string()
}

fn status_badge(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "badge badge-warning",
        OrderStatus::Preparing => "badge badge-info",
        OrderStatus::Ready => "badge badge-primary",
        OrderStatus::Completed => "badge badge-success",
    }
}

#[derive(Properties, PartialEq)]
struct OrdersTableProps {
    orders: Vec<OrderDto>,
    on_status: Callback<(i32, OrderStatus)>,
}

#[function_component(OrdersTable)]
fn orders_table(props: &OrdersTableProps) -> Html {
    if props.orders.is_empty() {
        return html! {
            <div class="alert alert-info"><span>{"No orders yet."}</span></div>
        };
    }

    html! {
        <div class="overflow-x-auto">
            <table class="table table-zebra">
                <thead>
                    <tr>
                        <th>{"Time"}</th><th>{"Order"}</th><th>{"Student"}</th><th>{"Item"}</th>
                        <th class="text-right">{"Qty"}</th><th class="text-right">{"Total"}</th><th>{"Status"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.orders.iter().map(|order| {
                        let id = order.id;
                        let onchange = {
                            let on_status = props.on_status.clone();
                            Callback::from(move |e: Event| {
                                let select: HtmlSelectElement = e.target_unchecked_into();
                                match OrderStatus::parse(&select.value()) {
                                    Some(status) => on_status.emit((id, status)),
                                    None => log::warn!("Unknown status selected: {}", select.value()),
                                }
                            })
                        };
                        html! {
                            <tr key={order.id}>
                                <td>{ order_time(order.created_at) }</td>
                                <td class="font-mono">{ order_code(order.id) }</td>
                                <td>{ order.student_name.clone().unwrap_or_else(|| "Walk-in".to_string()) }</td>
                                <td>{ order.menu_item.clone().unwrap_or_default() }</td>
                                <td class="text-right">{ order.quantity }</td>
                                <td class="text-right">{ format_inr(order.total) }</td>
                                <td>
                                    <div class="flex items-center gap-2">
                                        <span class={status_badge(order.status)}>{ order.status.as_str() }</span>
                                        <select class="select select-bordered select-xs" {onchange}>
                                            {for OrderStatus::ALL.iter().map(|status| html! {
                                                <option value={status.as_str()} selected={*status == order.status}>
                                                    { status.as_str() }
                                                </option>
                                            })}
                                        </select>
                                    </div>
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}

/// Live order board. Any insert, update or delete on the orders table
/// triggers a reload.
#[function_component(OrdersPage)]
pub fn orders_page() -> Html {
    let (fetch_state, refetch) = use_fetch_with_refetch(get_orders);
    let toast_ctx = use_context::<ToastContext>();
    let liveness = use_liveness();

    {
        let refetch = refetch.clone();
        use_effect_with((), move |_| {
            let subscription = ChangeSubscription::open(Table::Orders, move |_| refetch.emit(()))
                .map_err(|e| log::error!("{}", e))
                .ok();
            move || drop(subscription)
        });
    }

    let on_status = {
        let refetch = refetch.clone();
        Callback::from(move |(id, status): (i32, OrderStatus)| {
            let refetch = refetch.clone();
            let toast_ctx = toast_ctx.clone();
            let liveness = liveness.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = update_order_status(id, status).await;
                if !liveness.is_alive() {
                    return;
                }
                match result {
                    Ok(order) => {
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_success(format!("{} is now {}", order_code(order.id), order.status));
                        }
                        refetch.emit(());
                    }
                    Err(err) => {
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_error(err);
                        }
                    }
                }
            });
        })
    };

    let on_refresh = {
        let refetch = refetch.clone();
        Callback::from(move |_| refetch.emit(()))
    };

    html! {
        <Layout title="Orders" on_refresh={Some(on_refresh)}>
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title text-lg">{"Orders"}</h3>
                    <FetchRender<Vec<OrderDto>>
                        state={(*fetch_state).clone()}
                        render={Callback::from(move |orders: Vec<OrderDto>| html! {
                            <OrdersTable {orders} on_status={on_status.clone()} />
                        })}
                        on_retry={Some(refetch)}
                    />
                </div>
            </div>
        </Layout>
    }
}
