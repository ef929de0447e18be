//! Top navigation bar

use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::auth::{use_auth, AuthAction};

#[function_component(NavBar)]
pub fn nav_bar() -> Html {
    let auth = use_auth();
    let navigator = use_navigator().expect("NavBar must be rendered inside a router");

    let email = auth
        .session
        .user
        .as_ref()
        .map(|user| user.email.clone())
        .unwrap_or_default();

    let on_logout = {
        let auth = auth.clone();
        Callback::from(move |_| {
            auth.dispatch(AuthAction::Logout);
            navigator.push(&Route::Login);
        })
    };

    html! {
        <nav class="flex items-center justify-between px-6 py-4 border-b border-gray-200">
            <Link<Route> to={Route::Home} classes="text-lg font-bold">
                {"Picloop"}
            </Link<Route>>
            <div class="flex items-center gap-4">
                <span class="text-sm text-gray-500">{email}</span>
                <button
                    onclick={on_logout}
                    class="px-3 py-1.5 text-sm rounded-lg bg-gray-100 hover:bg-gray-200 transition-colors"
                >
                    {"Logout"}
                </button>
            </div>
        </nav>
    }
}
