use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: AttrValue,
    pub value: AttrValue,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    /// Extra classes for the value, e.g. `text-success`
    #[prop_or_default]
    pub value_class: Option<AttrValue>,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="stats shadow bg-base-100">
            <div class="stat">
                <div class="stat-title">{ &props.title }</div>
                <div class={classes!("stat-value", "text-2xl", props.value_class.as_ref().map(|c| c.to_string()))}>{ &props.value }</div>
                {for props.description.iter().map(|description| html! {
                    <div class="stat-desc">{ description }</div>
                })}
            </div>
        </div>
    }
}
