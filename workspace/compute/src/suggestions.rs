//! Prompt construction for suggestion generation and parsing of the reply.
//!
//! The reply is free-form text that should contain one JSON object with the
//! four suggestion categories. Parsing is strict once the object has been
//! isolated: every category must be an array of strings, otherwise that
//! category alone falls back to its default.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use common::SuggestionSet;
use model::entities::{ingredient, menu, order};

use crate::error::Result;
use crate::snapshot::index_menu;

/// Shown as the only key action when the reply carried none.
pub const SUGGESTION_FALLBACK: &str = "Unable to generate suggestions right now.";

pub const CATEGORIES: [&str; 4] = ["key_actions", "waste_reduction", "next_day_menu", "operational_tips"];

#[derive(Serialize)]
struct MenuLine<'a> {
    item: &'a str,
    category: &'a str,
    price: Decimal,
    available: bool,
    sold_today: i32,
    daily_demand: Option<i32>,
}

#[derive(Serialize)]
struct IngredientLine<'a> {
    name: &'a str,
    quantity: Decimal,
    remaining: Option<Decimal>,
    reorder_level: Decimal,
    unit: Option<&'a str>,
    expiry_date: Option<NaiveDate>,
}

#[derive(Serialize)]
struct OrderLine<'a> {
    item: Option<&'a str>,
    quantity: i32,
    amount: Option<Decimal>,
    status: &'static str,
    created_at: NaiveDateTime,
}

fn status_name(status: &order::OrderStatus) -> &'static str {
    match status {
        order::OrderStatus::Pending => "pending",
        order::OrderStatus::Preparing => "preparing",
        order::OrderStatus::Ready => "ready",
        order::OrderStatus::Completed => "completed",
    }
}

/// Serializes the three snapshots into the fixed instruction template.
#[instrument(skip_all, fields(menu = menu.len(), ingredients = ingredients.len(), orders = orders.len()))]
pub fn build_prompt(
    menu: &[menu::Model],
    ingredients: &[ingredient::Model],
    orders: &[order::Model],
) -> Result<String> {
    let index = index_menu(menu);
    let menu_lines: Vec<MenuLine<'_>> = menu
        .iter()
        .map(|item| MenuLine {
            item: &item.item,
            category: &item.category,
            price: item.price,
            available: item.availability,
            sold_today: item.sold_today,
            daily_demand: item.daily_demand,
        })
        .collect();
    let ingredient_lines: Vec<IngredientLine<'_>> = ingredients
        .iter()
        .map(|ingredient| IngredientLine {
            name: &ingredient.name,
            quantity: ingredient.quantity,
            remaining: ingredient.remaining_ingredient,
            reorder_level: ingredient.reorder_level,
            unit: ingredient.unit.as_deref(),
            expiry_date: ingredient.expiry_date,
        })
        .collect();
    let order_lines: Vec<OrderLine<'_>> = orders
        .iter()
        .map(|order| OrderLine {
            item: order
                .menu_id
                .and_then(|id| index.get(&id))
                .map(|item| item.item.as_str()),
            quantity: order.quantity,
            amount: order.amount,
            status: status_name(&order.status),
            created_at: order.created_at,
        })
        .collect();

    let prompt = format!(
        "You are an assistant for a college canteen manager who wants to cut food waste \
and plan production.\n\n\
Menu: {menu}\n\
Ingredients: {ingredients}\n\
Orders: {orders}\n\n\
Using this data, give exactly 3 short, practical suggestions for each category: \
key actions for today, waste reduction, next-day menu planning, and operational tips.\n\
Reply with JSON only, without Markdown or any other text, in exactly this shape:\n\
{{\"key_actions\": [\"...\"], \"waste_reduction\": [\"...\"], \
\"next_day_menu\": [\"...\"], \"operational_tips\": [\"...\"]}}",
        menu = serde_json::to_string(&menu_lines)?,
        ingredients = serde_json::to_string(&ingredient_lines)?,
        orders = serde_json::to_string(&order_lines)?,
    );
    debug!(length = prompt.len(), "Built suggestion prompt");
    Ok(prompt)
}

/// The set returned when nothing usable came back.
pub fn fallback_suggestions() -> SuggestionSet {
    SuggestionSet {
        key_actions: vec![SUGGESTION_FALLBACK.to_string()],
        ..Default::default()
    }
}

/// Extracts the suggestion set from a model reply. Never fails: categories
/// that are missing or not arrays of strings take their fallback value.
#[instrument(skip_all, fields(length = text.len()))]
pub fn parse_suggestions(text: &str) -> SuggestionSet {
    let unfenced = strip_code_fences(text);
    let object = json_object_candidates(&unfenced).find_map(|candidate| {
        let cleaned = collapse_line_breaks(&strip_trailing_commas(candidate));
        match serde_json::from_str::<Value>(&cleaned) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) => None,
            Err(e) => {
                debug!(error = %e, "Skipping brace-delimited text that is not JSON");
                None
            }
        }
    });

    let Some(object) = object else {
        warn!("No JSON object found in suggestion reply");
        return fallback_suggestions();
    };

    let set = SuggestionSet {
        key_actions: string_list(&object, "key_actions")
            .unwrap_or_else(|| vec![SUGGESTION_FALLBACK.to_string()]),
        waste_reduction: string_list(&object, "waste_reduction").unwrap_or_default(),
        next_day_menu: string_list(&object, "next_day_menu").unwrap_or_default(),
        operational_tips: string_list(&object, "operational_tips").unwrap_or_default(),
    };
    debug!(
        key_actions = set.key_actions.len(),
        waste_reduction = set.waste_reduction.len(),
        next_day_menu = set.next_day_menu.len(),
        operational_tips = set.operational_tips.len(),
        "Parsed suggestions"
    );
    set
}

/// Reads `key` as an array of strings. Blank entries are dropped.
fn string_list(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let Some(items) = object.get(key).and_then(Value::as_array) else {
        warn!(category = key, "Suggestion category missing or not an array");
        return None;
    };
    let tips: Option<Vec<String>> = items
        .iter()
        .map(|item| item.as_str().map(|tip| tip.trim().to_string()))
        .collect();
    match tips {
        Some(tips) => Some(tips.into_iter().filter(|tip| !tip.is_empty()).collect()),
        None => {
            warn!(category = key, "Suggestion category contains non-string items");
            None
        }
    }
}

/// Removes Markdown code fence markers together with their language tag.
fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("```") {
        out.push_str(&rest[..start]);
        rest = &rest[start + 3..];
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        rest = &rest[tag_len..];
    }
    out.push_str(rest);
    out
}

/// Balanced `{...}` spans in order of their opening brace.
fn json_object_candidates(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.match_indices('{')
        .filter_map(move |(start, _)| balanced_object(&text[start..]))
}

/// The object opening at the start of `text`, skipping braces inside strings.
/// `None` when it never closes.
fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..i + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Drops commas that directly precede `]` or `}` outside strings.
fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            out.push(c);
            continue;
        }
        if c == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some(']') | Some('}')) {
                continue;
            }
        }
        if c == '"' {
            in_string = true;
        }
        out.push(c);
    }
    out
}

fn collapse_line_breaks(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
