use std::collections::BTreeMap;
use std::str::FromStr;

use common::{
    format_inr, format_quantity, CreateMenuItemRequest, IngredientDto, IngredientLinkRequest, MenuItemDto,
    NutritionalInfo, UpdateMenuItemRequest,
};
use rust_decimal::Decimal;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api_client::ingredients::get_ingredients;
use crate::api_client::menu::{create_menu_item, get_menu, update_menu_item};
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::common::toast::ToastContext;
use crate::components::layout::layout::Layout;
use crate::hooks::use_liveness;

/// Raw text of the "add menu item" form.
#[derive(Clone, Debug, PartialEq)]
struct MenuForm {
    item: String,
    price: String,
    category: String,
    daily_demand: String,
    image_url: String,
    availability: bool,
    calories: String,
    protein: String,
    carbs: String,
    fat: String,
    /// Selected ingredient id → quantity per serving as typed
    links: BTreeMap<i32, String>,
}

impl Default for MenuForm {
    fn default() -> Self {
        Self {
            item: String::new(),
            price: String::new(),
            category: String::new(),
            daily_demand: String::new(),
            image_url: String::new(),
            availability: true,
            calories: String::new(),
            protein: String::new(),
            carbs: String::new(),
            fat: String::new(),
            links: BTreeMap::new(),
        }
    }
}

fn optional_decimal(label: &str, value: &str) -> Result<Option<Decimal>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(value)
        .map(Some)
        .map_err(|_| format!("{} must be a number", label))
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl MenuForm {
    fn to_request(&self) -> Result<CreateMenuItemRequest, String> {
        let item = self.item.trim();
        if item.is_empty() {
            return Err("Item name is required".to_string());
        }
        let price = optional_decimal("Price", &self.price)?.ok_or("Price is required")?;
        let daily_demand = match self.daily_demand.trim() {
            "" => None,
            demand => Some(
                demand
                    .parse::<i32>()
                    .map_err(|_| "Daily demand must be a whole number".to_string())?,
            ),
        };

        let nutrition = NutritionalInfo {
            calories: optional_decimal("Calories", &self.calories)?,
            protein: optional_decimal("Protein", &self.protein)?,
            carbs: optional_decimal("Carbs", &self.carbs)?,
            fat: optional_decimal("Fat", &self.fat)?,
        };
        let nutritional_info = (nutrition != NutritionalInfo::default()).then_some(nutrition);

        // A blank quantity means one unit per serving.
        let ingredients = self
            .links
            .iter()
            .map(|(&ingredient_id, quantity)| {
                let quantity = optional_decimal("Ingredient quantity", quantity)?.unwrap_or(Decimal::ONE);
                Ok(IngredientLinkRequest { ingredient_id, quantity })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(CreateMenuItemRequest {
            item: item.to_string(),
            price,
            availability: Some(self.availability),
            category: self.category.trim().to_string(),
            nutritional_info,
            daily_demand,
            image_url: optional_text(&self.image_url),
            ingredients,
        })
    }
}

fn ingredient_summary(item: &MenuItemDto) -> String {
    item.ingredients
        .iter()
        .map(|link| {
            let name = link
                .ingredient_name
                .clone()
                .unwrap_or_else(|| format!("#{}", link.ingredient_id));
            format!("{} ({})", name, format_quantity(link.quantity, None))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Properties, PartialEq)]
struct MenuTableProps {
    items: Vec<MenuItemDto>,
    on_toggle: Callback<MenuItemDto>,
}

#[function_component(MenuTable)]
fn menu_table(props: &MenuTableProps) -> Html {
    if props.items.is_empty() {
        return html! {
            <div class="alert alert-info"><span>{"No menu items yet."}</span></div>
        };
    }

    html! {
        <div class="overflow-x-auto">
            <table class="table table-zebra">
                <thead>
                    <tr>
                        <th>{"Item"}</th><th>{"Category"}</th><th class="text-right">{"Price"}</th>
                        <th class="text-right">{"Sold today"}</th><th class="text-right">{"Daily target"}</th>
                        <th>{"Ingredients"}</th><th>{"Available"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.items.iter().map(|item| {
                        let onchange = {
                            let on_toggle = props.on_toggle.clone();
                            let item = item.clone();
                            Callback::from(move |_| on_toggle.emit(item.clone()))
                        };
                        html! {
                            <tr key={item.id}>
                                <td class="font-medium">{ &item.item }</td>
                                <td><span class="badge badge-ghost">{ &item.category }</span></td>
                                <td class="text-right">{ format_inr(item.price) }</td>
                                <td class="text-right">{ item.sold_today }</td>
                                <td class="text-right">{ item.daily_demand.map(|d| d.to_string()).unwrap_or_default() }</td>
                                <td class="text-sm">{ ingredient_summary(item) }</td>
                                <td><input type="checkbox" class="toggle toggle-success" checked={item.availability} {onchange} /></td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}

fn text_field(label: &'static str, value: &str, input_type: &'static str, oninput: Callback<String>) -> Html {
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
struct MenuFormViewProps {
    ingredients: Vec<IngredientDto>,
    on_created: Callback<MenuItemDto>,
}

#[function_component(MenuFormView)]
fn menu_form_view(props: &MenuFormViewProps) -> Html {
    let form = use_state(MenuForm::default);
    let submitting = use_state(|| false);
    let toast_ctx = use_context::<ToastContext>();
    let liveness = use_liveness();

    let set = |update: fn(&mut MenuForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            update(&mut next, value);
            form.set(next);
        })
    };

    let toggle_link = |ingredient_id: i32| {
        let form = form.clone();
        Callback::from(move |_| {
            let mut next = (*form).clone();
            if next.links.remove(&ingredient_id).is_none() {
                next.links.insert(ingredient_id, String::new());
            }
            form.set(next);
        })
    };

    let set_link_quantity = |ingredient_id: i32| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.links.insert(ingredient_id, input.value());
            form.set(next);
        })
    };

    let toggle_availability = {
        let form = form.clone();
        Callback::from(move |_| {
            let mut next = (*form).clone();
            next.availability = !next.availability;
            form.set(next);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let submitting = submitting.clone();
        let on_created = props.on_created.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = match form.to_request() {
                Ok(request) => request,
                Err(message) => {
                    log::debug!("Menu form rejected: {}", message);
                    if let Some(toast_ctx) = &toast_ctx {
                        toast_ctx.show_error(message);
                    }
                    return;
                }
            };

            submitting.set(true);
            let form = form.clone();
            let submitting = submitting.clone();
            let on_created = on_created.clone();
            let toast_ctx = toast_ctx.clone();
            let liveness = liveness.clone();
            let expected_links = request.ingredients.len();

            wasm_bindgen_futures::spawn_local(async move {
                let result = create_menu_item(request).await;
                if !liveness.is_alive() {
                    return;
                }
                submitting.set(false);
                match result {
                    Ok(created) => {
                        if let Some(toast_ctx) = &toast_ctx {
                            if created.ingredients.len() < expected_links {
                                toast_ctx.show_warning(format!(
                                    "{} was added, but only {} of {} ingredients were linked",
                                    created.item,
                                    created.ingredients.len(),
                                    expected_links
                                ));
                            } else {
                                toast_ctx.show_success(format!("{} added to the menu", created.item));
                            }
                        }
                        form.set(MenuForm::default());
                        on_created.emit(created);
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

    html! {
        <form class="card bg-base-100 shadow" {onsubmit}>
            <div class="card-body gap-3">
                <h3 class="card-title text-lg">{"Add menu item"}</h3>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                    { text_field("Item", &form.item, "text", set(|f, v| f.item = v)) }
                    { text_field("Price (₹)", &form.price, "number", set(|f, v| f.price = v)) }
                    { text_field("Category", &form.category, "text", set(|f, v| f.category = v)) }
                    { text_field("Daily demand", &form.daily_demand, "number", set(|f, v| f.daily_demand = v)) }
                    { text_field("Image URL", &form.image_url, "url", set(|f, v| f.image_url = v)) }
                    <label class="label cursor-pointer justify-start gap-3">
                        <input type="checkbox" class="toggle toggle-success" checked={form.availability} onchange={toggle_availability} />
                        <span class="label-text">{"Available"}</span>
                    </label>
                </div>

                <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                    { text_field("Calories", &form.calories, "number", set(|f, v| f.calories = v)) }
                    { text_field("Protein (g)", &form.protein, "number", set(|f, v| f.protein = v)) }
                    { text_field("Carbs (g)", &form.carbs, "number", set(|f, v| f.carbs = v)) }
                    { text_field("Fat (g)", &form.fat, "number", set(|f, v| f.fat = v)) }
                </div>

                <div>
                    <span class="label-text">{"Ingredients per serving"}</span>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-2 mt-2">
                        {for props.ingredients.iter().map(|ingredient| {
                            let selected = form.links.get(&ingredient.id);
                            html! {
                                <div key={ingredient.id} class="flex items-center gap-2">
                                    <input type="checkbox" class="checkbox checkbox-sm"
                                        checked={selected.is_some()} onchange={toggle_link(ingredient.id)} />
                                    <span class="flex-1">{ &ingredient.name }</span>
                                    {for selected.map(|quantity| html! {
                                        <input class="input input-bordered input-xs w-24" type="number" step="any" placeholder="1"
                                            value={quantity.clone()} oninput={set_link_quantity(ingredient.id)} />
                                    })}
                                </div>
                            }
                        })}
                    </div>
                </div>

                <div class="card-actions justify-end">
                    <button type="submit" class="btn btn-primary btn-sm" disabled={*submitting}>
                        {if *submitting { "Saving..." } else { "Add item" }}
                    </button>
                </div>
            </div>
        </form>
    }
}

#[function_component(MenuPage)]
pub fn menu_page() -> Html {
    let (menu_state, refetch_menu) = use_fetch_with_refetch(get_menu);
    let (ingredients_state, _) = use_fetch_with_refetch(get_ingredients);
    let toast_ctx = use_context::<ToastContext>();
    let liveness = use_liveness();

    let on_toggle = {
        let refetch_menu = refetch_menu.clone();
        Callback::from(move |item: MenuItemDto| {
            let refetch_menu = refetch_menu.clone();
            let toast_ctx = toast_ctx.clone();
            let liveness = liveness.clone();
            let patch = UpdateMenuItemRequest {
                availability: Some(!item.availability),
                ..Default::default()
            };
            wasm_bindgen_futures::spawn_local(async move {
                let result = update_menu_item(item.id, patch).await;
                if !liveness.is_alive() {
                    return;
                }
                match result {
                    Ok(_) => refetch_menu.emit(()),
                    Err(err) => {
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_error(err);
                        }
                    }
                }
            });
        })
    };

    let on_created = {
        let refetch_menu = refetch_menu.clone();
        Callback::from(move |_| refetch_menu.emit(()))
    };

    let ingredients = ingredients_state.data().cloned().unwrap_or_default();

    let on_refresh = {
        let refetch_menu = refetch_menu.clone();
        Callback::from(move |_| refetch_menu.emit(()))
    };

    html! {
        <Layout title="Menu" on_refresh={Some(on_refresh)}>
            <div class="flex flex-col gap-6">
                <MenuFormView {ingredients} {on_created} />
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title text-lg">{"Menu items"}</h3>
                        <FetchRender<Vec<MenuItemDto>>
                            state={(*menu_state).clone()}
                            render={Callback::from(move |items: Vec<MenuItemDto>| html! {
                                <MenuTable {items} on_toggle={on_toggle.clone()} />
                            })}
                            on_retry={Some(refetch_menu)}
                        />
                    </div>
                </div>
            </div>
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> MenuForm {
        MenuForm {
            item: " Veg Thali ".to_string(),
            price: "80".to_string(),
            category: "Lunch".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn builds_request_from_minimal_form() {
        let request = filled().to_request().unwrap();

        assert_eq!(request.item, "Veg Thali");
        assert_eq!(request.price, Decimal::new(80, 0));
        assert_eq!(request.availability, Some(true));
        assert_eq!(request.nutritional_info, None);
        assert_eq!(request.daily_demand, None);
        assert!(request.ingredients.is_empty());
    }

    #[test]
    fn blank_link_quantity_means_one_unit() {
        let mut form = filled();
        form.links.insert(3, String::new());
        form.links.insert(1, "0.25".to_string());

        let request = form.to_request().unwrap();

        assert_eq!(request.ingredients[0].ingredient_id, 1);
        assert_eq!(request.ingredients[0].quantity, Decimal::new(25, 2));
        assert_eq!(request.ingredients[1].quantity, Decimal::ONE);
    }

    #[test]
    fn reports_bad_numbers() {
        let mut form = filled();
        form.price = "eighty".to_string();
        assert_eq!(form.to_request().unwrap_err(), "Price must be a number");

        let mut form = filled();
        form.daily_demand = "4.5".to_string();
        assert!(form.to_request().is_err());

        let mut form = filled();
        form.item = "  ".to_string();
        assert_eq!(form.to_request().unwrap_err(), "Item name is required");
    }

    #[test]
    fn partial_nutrition_is_kept() {
        let mut form = filled();
        form.protein = "12.5".to_string();

        let nutrition = form.to_request().unwrap().nutritional_info.unwrap();

        assert_eq!(nutrition.protein, Some(Decimal::new(125, 1)));
        assert_eq!(nutrition.calories, None);
    }
}
