use common::validate_login;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::common::toast::ToastContext;
use crate::components::layout::layout::Layout;
use crate::router::Route;

fn input_setter(state: UseStateHandle<String>) -> Callback<InputEvent> {
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

/// Staff login form. Fields are checked locally; nothing is sent anywhere.
#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let staff_id = use_state(String::new);
    let birthdate = use_state(String::new);
    let password = use_state(String::new);
    let show_password = use_state(|| false);
    let error = use_state(|| None::<String>);
    let toast_ctx = use_context::<ToastContext>();
    let navigator = use_navigator();

    let onsubmit = {
        let staff_id = staff_id.clone();
        let birthdate = birthdate.clone();
        let password = password.clone();
        let error = error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_login(&staff_id, &birthdate, &password) {
                Ok(_) => {
                    log::info!("Staff {} signed in", staff_id.trim());
                    error.set(None);
                    if let Some(toast_ctx) = &toast_ctx {
                        toast_ctx.show_success(format!("Welcome, {}", staff_id.trim()));
                    }
                    if let Some(navigator) = &navigator {
                        navigator.push(&Route::Dashboard);
                    }
                }
                Err(e) => {
                    log::debug!("Login form rejected: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
        })
    };

    let toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_| show_password.set(!*show_password))
    };

    html! {
        <Layout title="Log In">
            <div class="flex justify-center py-12">
                <div class="card w-full max-w-sm bg-base-100 shadow-2xl">
                    <form class="card-body gap-4" {onsubmit}>
                        <h2 class="card-title">{"Login to your account"}</h2>
                        <p class="text-sm text-gray-500">{"Enter your assigned staff ID, birthdate and password"}</p>

                        <label class="form-control">
                            <span class="label-text">{"Staff ID"}</span>
                            <input class="input input-bordered" type="text" placeholder="XXXXXX"
                                value={(*staff_id).clone()} oninput={input_setter(staff_id.clone())} />
                        </label>

                        <label class="form-control">
                            <span class="label-text">{"Date of birth"}</span>
                            <input class="input input-bordered" type="date"
                                value={(*birthdate).clone()} oninput={input_setter(birthdate.clone())} />
                        </label>

                        <label class="form-control">
                            <span class="label-text">{"Password"}</span>
                            <div class="join">
                                <input class="input input-bordered join-item w-full"
                                    type={if *show_password { "text" } else { "password" }}
                                    value={(*password).clone()} oninput={input_setter(password.clone())} />
                                <button type="button" class="btn join-item" onclick={toggle_password}>
                                    <i class={if *show_password { "fas fa-eye-slash" } else { "fas fa-eye" }}></i>
                                </button>
                            </div>
                        </label>

                        {for error.as_ref().map(|message| html! {
                            <div class="alert alert-error text-sm">{ message }</div>
                        })}

                        <button type="submit" class="btn btn-error w-full">{"Login"}</button>
                    </form>
                </div>
            </div>
        </Layout>
    }
}
