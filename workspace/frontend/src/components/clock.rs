use chrono::{Local, NaiveDateTime};
use gloo_timers::callback::Interval;
use yew::prelude::*;

fn time_label(now: NaiveDateTime) -> String {
    now.format("%H:%M:%S").to_string()
}

fn date_label(now: NaiveDateTime) -> String {
    now.format("%A, %-d %B %Y").to_string()
}

/// Wall clock ticking once a second; the interval is cancelled on unmount.
#[function_component(Clock)]
pub fn clock() -> Html {
    let now = use_state(|| Local::now().naive_local());

    {
        let now = now.clone();
        use_effect_with((), move |_| {
            let interval = Interval::new(1_000, move || now.set(Local::now().naive_local()));
            move || drop(interval)
        });
    }

    html! {
        <div class="flex flex-col items-center justify-center gap-1 py-4">
            <span class="text-5xl font-semibold tracking-wide">{ time_label(*now) }</span>
            <span class="text-sm text-gray-500 uppercase tracking-wider">{"Current Time"}</span>
            <span class="text-sm font-medium">{ date_label(*now) }</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn labels_use_long_date_and_24h_time() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 9)
            .unwrap();

        assert_eq!(time_label(now), "07:05:09");
        assert_eq!(date_label(now), "Sunday, 9 March 2025");
    }
}
