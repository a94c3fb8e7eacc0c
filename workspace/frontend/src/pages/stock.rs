use std::str::FromStr;

use chrono::NaiveDate;
use common::{format_inr, format_quantity, CreateIngredientRequest, IngredientDto, UpdateIngredientRequest};
use rust_decimal::Decimal;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api_client::ingredients::{create_ingredient, get_ingredients, update_ingredient};
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::common::toast::ToastContext;
use crate::components::layout::layout::Layout;
use crate::components::stat_card::StatCard;
use crate::hooks::use_liveness;

#[derive(Clone, Debug, Default, PartialEq)]
struct IngredientForm {
    name: String,
    quantity: String,
    reorder_level: String,
    expiry_date: String,
    cost_per_unit: String,
    unit: String,
}

fn parse_decimal(label: &str, value: &str) -> Result<Decimal, String> {
    Decimal::from_str(value.trim()).map_err(|_| format!("{} must be a number", label))
}

fn parse_expiry(value: &str) -> Result<Option<NaiveDate>, String> {
    match value.trim() {
        "" => Ok(None),
        date => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| "Expiry date must look like 2025-03-31".to_string()),
    }
}

impl IngredientForm {
    fn from_dto(ingredient: &IngredientDto) -> Self {
        Self {
            name: ingredient.name.clone(),
            quantity: ingredient.quantity.normalize().to_string(),
            reorder_level: ingredient.reorder_level.normalize().to_string(),
            expiry_date: ingredient
                .expiry_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            cost_per_unit: ingredient.cost_per_unit.normalize().to_string(),
            unit: ingredient.unit.clone().unwrap_or_default(),
        }
    }

    fn to_create_request(&self) -> Result<CreateIngredientRequest, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Ingredient name is required".to_string());
        }
        let unit = self.unit.trim();
        Ok(CreateIngredientRequest {
            name: name.to_string(),
            quantity: parse_decimal("Quantity", &self.quantity)?,
            reorder_level: parse_decimal("Reorder level", &self.reorder_level)?,
            expiry_date: parse_expiry(&self.expiry_date)?,
            cost_per_unit: parse_decimal("Cost per unit", &self.cost_per_unit)?,
            unit: (!unit.is_empty()).then(|| unit.to_string()),
            remaining: None,
        })
    }

    /// The same fields as a full patch; the stored remaining quantity is left alone.
    fn to_update_request(&self) -> Result<UpdateIngredientRequest, String> {
        let create = self.to_create_request()?;
        Ok(UpdateIngredientRequest {
            name: Some(create.name),
            quantity: Some(create.quantity),
            reorder_level: Some(create.reorder_level),
            expiry_date: create.expiry_date,
            cost_per_unit: Some(create.cost_per_unit),
            unit: create.unit,
            remaining: None,
        })
    }
}

enum Submission {
    Create(CreateIngredientRequest),
    Update(i32, UpdateIngredientRequest),
}

impl Submission {
    async fn send(self) -> Result<IngredientDto, String> {
        match self {
            Submission::Create(request) => create_ingredient(request).await,
            Submission::Update(id, request) => update_ingredient(id, request).await,
        }
    }
}

fn stock_badges(ingredient: &IngredientDto) -> Html {
    html! {
        <>
            if ingredient.low_stock {
                <span class="badge badge-warning gap-1"><i class="fas fa-exclamation-triangle"></i>{"Low"}</span>
            }
            if ingredient.expired {
                <span class="badge badge-error">{"Expired"}</span>
            }
            if !ingredient.low_stock && !ingredient.expired {
                <span class="badge badge-success">{"OK"}</span>
            }
        </>
    }
}

#[derive(Properties, PartialEq)]
struct StockTableProps {
    ingredients: Vec<IngredientDto>,
    on_edit: Callback<IngredientDto>,
}

#[function_component(StockTable)]
fn stock_table(props: &StockTableProps) -> Html {
    let low = props.ingredients.iter().filter(|i| i.low_stock).count();
    let expired = props.ingredients.iter().filter(|i| i.expired).count();
    let stock_value: Decimal = props
        .ingredients
        .iter()
        .map(|i| i.remaining * i.cost_per_unit)
        .sum();

    html! {
        <div class="flex flex-col gap-4">
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <StatCard title="Low stock" value={low.to_string()} value_class={AttrValue::from("text-warning")} />
                <StatCard title="Expired" value={expired.to_string()} value_class={AttrValue::from("text-error")} />
                <StatCard title="Stock value" value={format_inr(stock_value)} description={AttrValue::from("Remaining quantity at cost")} />
            </div>
            <div class="overflow-x-auto">
                <table class="table table-zebra">
                    <thead>
                        <tr>
                            <th>{"Ingredient"}</th><th class="text-right">{"Quantity"}</th><th class="text-right">{"Remaining"}</th>
                            <th class="text-right">{"Reorder at"}</th><th>{"Expiry"}</th><th class="text-right">{"Cost / unit"}</th>
                            <th>{"Status"}</th><th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {for props.ingredients.iter().map(|ingredient| {
                            let unit = ingredient.unit.as_deref();
                            let onclick = {
                                let on_edit = props.on_edit.clone();
                                let ingredient = ingredient.clone();
                                Callback::from(move |_| on_edit.emit(ingredient.clone()))
                            };
                            html! {
                                <tr key={ingredient.id} class={classes!(ingredient.expired.then_some("text-error"))}>
                                    <td class="font-medium">{ &ingredient.name }</td>
                                    <td class="text-right">{ format_quantity(ingredient.quantity, unit) }</td>
                                    <td class="text-right">{ format_quantity(ingredient.remaining.round_dp(2), unit) }</td>
                                    <td class="text-right">{ format_quantity(ingredient.reorder_level, unit) }</td>
                                    <td>{ ingredient.expiry_date.map(|d| d.format("%d %b %Y").to_string()).unwrap_or_else(|| "-".to_string()) }</td>
                                    <td class="text-right">{ format_inr(ingredient.cost_per_unit) }</td>
                                    <td class="flex gap-1">{ stock_badges(ingredient) }</td>
                                    <td>
                                        <button class="btn btn-ghost btn-xs" {onclick}><i class="fas fa-pen"></i></button>
                                    </td>
                                </tr>
                            }
                        })}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

fn form_field(label: &'static str, value: &str, input_type: &'static str, oninput: Callback<String>) -> Html {
    let oninput = Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        oninput.emit(input.value());
    });
    html! {
        <label class="form-control">
            <span class="label-text">{ label }</span>
            <input class="input input-bordered input-sm" type={input_type} value={value.to_string()} {oninput} />
        </label>
    }
}

#[derive(Properties, PartialEq)]
struct IngredientFormViewProps {
    /// Ingredient being edited; `None` adds a new one.
    editing: Option<IngredientDto>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
}

#[function_component(IngredientFormView)]
fn ingredient_form_view(props: &IngredientFormViewProps) -> Html {
    let form = use_state(IngredientForm::default);
    let toast_ctx = use_context::<ToastContext>();
    let liveness = use_liveness();

    {
        let form = form.clone();
        use_effect_with(props.editing.clone(), move |editing| {
            form.set(editing.as_ref().map(IngredientForm::from_dto).unwrap_or_default());
            || ()
        });
    }

    let set = |update: fn(&mut IngredientForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            update(&mut next, value);
            form.set(next);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let editing_id = props.editing.as_ref().map(|i| i.id);
        let on_saved = props.on_saved.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let toast_ctx = toast_ctx.clone();
            let liveness = liveness.clone();
            let on_saved = on_saved.clone();
            let form = form.clone();

            let submission = match editing_id {
                Some(id) => form.to_update_request().map(|request| Submission::Update(id, request)),
                None => form.to_create_request().map(Submission::Create),
            };
            let submission = match submission {
                Ok(submission) => submission,
                Err(message) => {
                    if let Some(toast_ctx) = &toast_ctx {
                        toast_ctx.show_error(message);
                    }
                    return;
                }
            };

            wasm_bindgen_futures::spawn_local(async move {
                let result = submission.send().await;
                if !liveness.is_alive() {
                    return;
                }
                match result {
                    Ok(saved) => {
                        log::info!("Saved ingredient {} ({})", saved.name, saved.id);
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_success(format!("{} saved", saved.name));
                        }
                        form.set(IngredientForm::default());
                        on_saved.emit(());
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

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    let title = match &props.editing {
        Some(ingredient) => format!("Edit {}", ingredient.name),
        None => "Add ingredient".to_string(),
    };

    html! {
        <form class="card bg-base-100 shadow" {onsubmit}>
            <div class="card-body gap-3">
                <h3 class="card-title text-lg">{ title }</h3>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                    { form_field("Name", &form.name, "text", set(|f, v| f.name = v)) }
                    { form_field("Quantity", &form.quantity, "number", set(|f, v| f.quantity = v)) }
                    { form_field("Unit", &form.unit, "text", set(|f, v| f.unit = v)) }
                    { form_field("Reorder level", &form.reorder_level, "number", set(|f, v| f.reorder_level = v)) }
                    { form_field("Expiry date", &form.expiry_date, "date", set(|f, v| f.expiry_date = v)) }
                    { form_field("Cost per unit (₹)", &form.cost_per_unit, "number", set(|f, v| f.cost_per_unit = v)) }
                </div>
                <div class="card-actions justify-end">
                    if props.editing.is_some() {
                        <button type="button" class="btn btn-ghost btn-sm" onclick={on_cancel}>{"Cancel"}</button>
                    }
                    <button type="submit" class="btn btn-success btn-sm">
                        {if props.editing.is_some() { "Update" } else { "Add" }}
                    </button>
                </div>
            </div>
        </form>
    }
}

#[function_component(StockPage)]
pub fn stock_page() -> Html {
    let (fetch_state, refetch) = use_fetch_with_refetch(get_ingredients);
    let editing = use_state(|| None::<IngredientDto>);

    let on_edit = {
        let editing = editing.clone();
        Callback::from(move |ingredient: IngredientDto| editing.set(Some(ingredient)))
    };

    let on_saved = {
        let editing = editing.clone();
        let refetch = refetch.clone();
        Callback::from(move |_| {
            editing.set(None);
            refetch.emit(());
        })
    };

    let on_cancel = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(None))
    };

    let on_refresh = {
        let refetch = refetch.clone();
        Callback::from(move |_| refetch.emit(()))
    };

    html! {
        <Layout title="Stock" on_refresh={Some(on_refresh)}>
            <div class="flex flex-col gap-6">
                <div>
                    <h2 class="text-2xl font-semibold">{"Stock"}</h2>
                    <p class="text-sm text-gray-500">{"Track ingredient levels, expiry, and reorder requirements."}</p>
                </div>
                <IngredientFormView editing={(*editing).clone()} {on_saved} {on_cancel} />
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <FetchRender<Vec<IngredientDto>>
                            state={(*fetch_state).clone()}
                            render={Callback::from(move |ingredients: Vec<IngredientDto>| html! {
                                <StockTable {ingredients} on_edit={on_edit.clone()} />
                            })}
                            on_retry={Some(refetch)}
                        />
                    </div>
                </div>
            </div>
        </Layout>
    }
}
