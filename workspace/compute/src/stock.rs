//! Ingredient stock levels, depletion ranking and expiry.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use common::{DepletedIngredient, IngredientDto};
use model::entities::{ingredient, menu_ingredient};

use crate::snapshot::MenuIndex;

/// Remaining quantity of an ingredient. Uses the stored value when the store
/// tracks one, otherwise subtracts what today's sales consumed, floored at zero.
pub fn effective_remaining(
    ingredient: &ingredient::Model,
    menu: &MenuIndex<'_>,
    links: &[menu_ingredient::Model],
) -> Decimal {
    if let Some(remaining) = ingredient.remaining_ingredient {
        return remaining;
    }
    let consumed: Decimal = links
        .iter()
        .filter(|link| link.ingredient_id == ingredient.id)
        .filter_map(|link| {
            menu.get(&link.menu_id)
                .map(|item| Decimal::from(item.sold_today) * link.quantity)
        })
        .sum();
    (ingredient.quantity - consumed).max(Decimal::ZERO)
}

/// Low stock when either the remaining or the on-hand quantity is at or below the reorder level.
pub fn is_low_stock(ingredient: &ingredient::Model, remaining: Decimal) -> bool {
    remaining <= ingredient.reorder_level || ingredient.quantity <= ingredient.reorder_level
}

pub fn is_expired(ingredient: &ingredient::Model, today: NaiveDate) -> bool {
    ingredient.is_expired(today)
}

/// An ingredient with its effective remaining quantity and stock flags.
pub fn stock_level(
    ingredient: &ingredient::Model,
    menu: &MenuIndex<'_>,
    links: &[menu_ingredient::Model],
    today: NaiveDate,
) -> IngredientDto {
    let remaining = effective_remaining(ingredient, menu, links);
    IngredientDto {
        id: ingredient.id,
        name: ingredient.name.clone(),
        quantity: ingredient.quantity,
        reorder_level: ingredient.reorder_level,
        expiry_date: ingredient.expiry_date,
        cost_per_unit: ingredient.cost_per_unit,
        unit: ingredient.unit.clone(),
        remaining,
        low_stock: is_low_stock(ingredient, remaining),
        expired: is_expired(ingredient, today),
    }
}

/// [`stock_level`] for every ingredient, in input order.
pub fn stock_levels(
    ingredients: &[ingredient::Model],
    menu: &MenuIndex<'_>,
    links: &[menu_ingredient::Model],
    today: NaiveDate,
) -> Vec<IngredientDto> {
    ingredients
        .iter()
        .map(|ingredient| stock_level(ingredient, menu, links, today))
        .collect()
}

/// Most consumed ingredients by `quantity − remaining`, descending. Ties keep input order.
pub fn top_depleted(
    ingredients: &[ingredient::Model],
    menu: &MenuIndex<'_>,
    links: &[menu_ingredient::Model],
    n: usize,
) -> Vec<DepletedIngredient> {
    let mut ranked: Vec<DepletedIngredient> = ingredients
        .iter()
        .map(|ingredient| {
            let remaining = effective_remaining(ingredient, menu, links);
            DepletedIngredient {
                ingredient_id: ingredient.id,
                name: ingredient.name.clone(),
                quantity: ingredient.quantity,
                remaining,
                used: (ingredient.quantity - remaining).max(Decimal::ZERO),
                unit: ingredient.unit.clone(),
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.used.cmp(&a.used));
    ranked.truncate(n);
    ranked
}

/// Cost of all stock that expired before `today`.
pub fn expired_loss(ingredients: &[ingredient::Model], today: NaiveDate) -> Decimal {
    ingredients
        .iter()
        .filter(|ingredient| is_expired(ingredient, today))
        .map(|ingredient| ingredient.quantity * ingredient.cost_per_unit)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::index_menu;
    use crate::testing::{day, ingredient_row, link, menu_item};

    #[test]
    fn remaining_prefers_stored_value() {
        let menu = vec![menu_item(1, "Dal", 40, 10, "Lunch")];
        let index = index_menu(&menu);
        let links = vec![link(1, 1, 1, Decimal::new(2, 1))];
        let stored = ingredient_row(1, "Toor dal", 20, 5, Some(7));
        assert_eq!(effective_remaining(&stored, &index, &links), Decimal::from(7));
    }

    #[test]
    fn remaining_is_derived_from_sales_and_floored() {
        let menu = vec![
            menu_item(1, "Dal", 40, 10, "Lunch"),
            menu_item(2, "Dal fry", 50, 5, "Lunch"),
        ];
        let index = index_menu(&menu);
        let links = vec![
            link(1, 1, 1, Decimal::new(5, 1)), // 10 × 0.5 = 5
            link(2, 2, 1, Decimal::ONE),       // 5 × 1 = 5
        ];
        let dal = ingredient_row(1, "Toor dal", 12, 3, None);
        assert_eq!(effective_remaining(&dal, &index, &links), Decimal::from(2));

        let scarce = ingredient_row(1, "Toor dal", 6, 3, None);
        assert_eq!(effective_remaining(&scarce, &index, &links), Decimal::ZERO);
    }

    #[test]
    fn low_stock_on_either_quantity() {
        let healthy = ingredient_row(1, "Rice", 50, 10, Some(40));
        assert!(!is_low_stock(&healthy, Decimal::from(40)));
        // remaining at the threshold
        assert!(is_low_stock(&healthy, Decimal::from(10)));
        // on-hand at the threshold even though remaining looks fine
        let thin = ingredient_row(2, "Oil", 10, 10, Some(40));
        assert!(is_low_stock(&thin, Decimal::from(40)));
    }

    #[test]
    fn stock_levels_flags_expiry() {
        let mut milk = ingredient_row(1, "Milk", 20, 5, None);
        milk.expiry_date = Some(day(9));
        let mut curd = ingredient_row(2, "Curd", 20, 5, None);
        curd.expiry_date = Some(day(10));
        let index = MenuIndex::new();
        let levels = stock_levels(&[milk, curd], &index, &[], day(10));
        assert!(levels[0].expired);
        assert!(!levels[1].expired);
        assert_eq!(levels[0].remaining, Decimal::from(20));
    }

    #[test]
    fn top_depleted_ranks_by_used_quantity() {
        let ingredients = vec![
            ingredient_row(1, "A", 10, 1, Some(9)),  // used 1
            ingredient_row(2, "B", 10, 1, Some(2)),  // used 8
            ingredient_row(3, "C", 10, 1, Some(5)),  // used 5
            ingredient_row(4, "D", 10, 1, Some(5)),  // used 5
            ingredient_row(5, "E", 10, 1, Some(10)), // used 0
            ingredient_row(6, "F", 10, 1, Some(0)),  // used 10
        ];
        let index = MenuIndex::new();
        let top = top_depleted(&ingredients, &index, &[], 5);
        let names: Vec<&str> = top.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["F", "B", "C", "D", "A"]);
        assert_eq!(top[0].used, Decimal::from(10));
    }

    #[test]
    fn expired_loss_sums_cost_of_expired_stock() {
        let mut bread = ingredient_row(1, "Bread", 4, 1, None);
        bread.expiry_date = Some(day(8));
        bread.cost_per_unit = Decimal::new(255, 1);
        let fresh = ingredient_row(2, "Rice", 50, 10, None);
        assert_eq!(expired_loss(&[bread, fresh], day(10)), Decimal::from(102));
    }
}
