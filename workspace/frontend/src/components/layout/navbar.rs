use yew::prelude::*;
use yew_router::prelude::*;
use crate::router::Route;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: String,
    #[prop_or_default]
    pub on_refresh: Option<Callback<()>>,
}

#[function_component(Navbar)]
pub fn navbar(props: &Props) -> Html {
    let refresh_button = props.on_refresh.clone().map(|on_refresh| {
        let onclick = Callback::from(move |_| {
            log::debug!("Manual refresh requested");
            on_refresh.emit(());
        });
        html! {
            <button class="btn btn-ghost btn-circle" title="Refresh" {onclick}>
                <i class="fas fa-sync-alt text-lg"></i>
            </button>
        }
    });

    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-none lg:hidden">
                <label aria-label="open sidebar" class="btn btn-square btn-ghost" for="canteen-drawer">
                    <i class="fas fa-bars text-xl"></i>
                </label>
            </div>
            <div class="flex-1 px-4">
                <h1 class="text-xl font-bold" id="page-title">{ &props.title }</h1>
            </div>
            <div class="flex-none gap-2">
                { for refresh_button }
                <Link<Route> to={Route::Login} classes="btn btn-sm btn-warning">{"Log In"}</Link<Route>>
            </div>
        </div>
    }
}
