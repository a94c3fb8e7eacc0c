use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::layout::layout::Layout;
use crate::pages::dashboard::DashboardPage;
use crate::pages::login::LoginPage;
use crate::pages::menu::MenuPage;
use crate::pages::orders::OrdersPage;
use crate::pages::overview::OverviewPage;
use crate::pages::stock::StockPage;
use crate::pages::suggestions::SuggestionsPage;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/menu")]
    Menu,
    #[at("/orders")]
    Orders,
    #[at("/stock")]
    Stock,
    #[at("/suggestions")]
    Suggestions,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Home => {
            log::trace!("Rendering Overview page");
            html! { <OverviewPage /> }
        }
        Route::Login => {
            log::trace!("Rendering Login page");
            html! { <LoginPage /> }
        }
        Route::Dashboard => {
            log::trace!("Rendering Dashboard page");
            html! { <DashboardPage /> }
        }
        Route::Menu => {
            log::trace!("Rendering Menu page");
            html! { <MenuPage /> }
        }
        Route::Orders => {
            log::trace!("Rendering Orders page");
            html! { <OrdersPage /> }
        }
        Route::Stock => {
            log::trace!("Rendering Stock page");
            html! { <StockPage /> }
        }
        Route::Suggestions => {
            log::trace!("Rendering Suggestions page");
            html! { <SuggestionsPage /> }
        }
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! { <Layout title="404"><h1>{"404 Not Found"}</h1></Layout> }
        }
    }
}
