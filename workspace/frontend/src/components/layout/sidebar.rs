use yew::prelude::*;
use yew_router::prelude::*;
use crate::router::Route;

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    html! {
        <div class="drawer-side z-50">
            <label aria-label="close sidebar" class="drawer-overlay" for="canteen-drawer"></label>
            <ul class="menu p-4 w-72 min-h-full bg-base-100 text-base-content border-r border-base-300">
                <li class="mb-4">
                    <div class="flex items-center gap-3 px-2">
                        <div class="w-10 h-10 rounded-lg bg-primary flex items-center justify-center text-primary-content text-2xl">
                            <i class="fas fa-utensils"></i>
                        </div>
                        <span class="text-2xl font-bold tracking-tight">{"Canteen Admin"}</span>
                    </div>
                </li>

                <li><Link<Route> to={Route::Home} classes="nav-link"><i class="fas fa-home w-5"></i> {"Overview"}</Link<Route>></li>
                <li><Link<Route> to={Route::Menu} classes="nav-link"><i class="fas fa-book-open w-5"></i> {"Menu"}</Link<Route>></li>
                <li><Link<Route> to={Route::Stock} classes="nav-link"><i class="fas fa-boxes w-5"></i> {"Stock"}</Link<Route>></li>
                <li><Link<Route> to={Route::Dashboard} classes="nav-link"><i class="fas fa-chart-line w-5"></i> {"Dashboard"}</Link<Route>></li>
                <li><Link<Route> to={Route::Orders} classes="nav-link"><i class="fas fa-receipt w-5"></i> {"Orders"}</Link<Route>></li>
                <li><Link<Route> to={Route::Suggestions} classes="nav-link"><i class="fas fa-lightbulb w-5"></i> {"Suggestions"}</Link<Route>></li>
            </ul>
        </div>
    }
}
