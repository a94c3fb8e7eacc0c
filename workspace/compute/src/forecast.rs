//! Selection and deduplication of forecast entries for display.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use common::{DemandComparison, ForecastEntry, ForecastView};
use model::entities::menu;

/// Distinct forecast dates, ascending.
pub fn available_dates(entries: &[ForecastEntry]) -> Vec<NaiveDate> {
    entries
        .iter()
        .map(|entry| entry.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Entries for `date`, keeping only the first entry seen for each dish.
pub fn entries_for_date(entries: &[ForecastEntry], date: NaiveDate) -> Vec<ForecastEntry> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter(|entry| entry.date == date)
        .filter(|entry| seen.insert(entry.dish.clone()))
        .cloned()
        .collect()
}

/// Sum of predicted and recommended servings.
pub fn totals(entries: &[ForecastEntry]) -> (i64, i64) {
    entries.iter().fold((0, 0), |(predicted, recommended), entry| {
        (predicted + entry.predicted, recommended + entry.recommended_servings)
    })
}

/// Pairs each forecast dish with the menu item of the same name, ignoring case.
pub fn compare_with_menu(entries: &[ForecastEntry], menu: &[menu::Model]) -> Vec<DemandComparison> {
    entries
        .iter()
        .map(|entry| {
            let dish = entry.dish.trim();
            let item = menu.iter().find(|item| item.item.trim().eq_ignore_ascii_case(dish));
            DemandComparison {
                dish: entry.dish.clone(),
                predicted: entry.predicted,
                recommended_servings: entry.recommended_servings,
                confidence: entry.confidence,
                menu_id: item.map(|item| item.id),
                sold_today: item.map(|item| item.sold_today),
                daily_demand: item.and_then(|item| item.daily_demand),
            }
        })
        .collect()
}

/// Picks the date to show: the requested one, else today when forecast, else the earliest.
pub fn select_date(
    available: &[NaiveDate],
    requested: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<NaiveDate> {
    requested
        .or_else(|| available.contains(&today).then_some(today))
        .or_else(|| available.first().copied())
}

/// Builds the per-date forecast view shown on the suggestions page.
pub fn forecast_view(
    entries: &[ForecastEntry],
    requested: Option<NaiveDate>,
    today: NaiveDate,
    menu: &[menu::Model],
) -> ForecastView {
    let available_dates = available_dates(entries);
    let Some(selected) = select_date(&available_dates, requested, today) else {
        return ForecastView { available_dates, ..Default::default() };
    };

    let selected_entries = entries_for_date(entries, selected);
    let (total_predicted, total_recommended) = totals(&selected_entries);
    debug!(
        %selected,
        raw = entries.len(),
        kept = selected_entries.len(),
        "Selected forecast entries"
    );

    ForecastView {
        comparisons: compare_with_menu(&selected_entries, menu),
        available_dates,
        selected_date: Some(selected),
        entries: selected_entries,
        total_predicted,
        total_recommended,
    }
}
