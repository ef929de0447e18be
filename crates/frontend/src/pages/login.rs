//! Login page

use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::auth::use_is_authenticated;
use crate::services::AuthService;

#[function_component(Login)]
pub fn login() -> Html {
    let is_authenticated = use_is_authenticated();

    if is_authenticated {
        return html! { <Redirect<Route> to={Route::Home} /> };
    }

    let on_google_login = Callback::from(|_| match AuthService::new().login_redirect_url() {
        Ok(url) => {
            if let Err(err) = gloo::utils::window().location().set_href(&url) {
                log::error!("failed to navigate to OAuth provider: {err:?}");
            }
        }
        Err(err) => log::error!("failed to build auth client: {err}"),
    });

    let dev_login = {
        #[cfg(debug_assertions)]
        {
            html! { <DevLogin /> }
        }
        #[cfg(not(debug_assertions))]
        {
            html! {}
        }
    };

    html! {
        <div class="min-h-screen flex items-center justify-center px-4">
            <div class="max-w-md w-full text-center">
                <h1 class="text-3xl font-bold mb-2">{"Picloop"}</h1>
                <p class="text-gray-500 mb-8">{"Share and recycle your images"}</p>
                <button
                    onclick={on_google_login}
                    class="w-full px-4 py-3 text-sm font-medium rounded-lg bg-blue-600 text-white hover:bg-blue-700 transition-colors"
                >
                    {"Sign in with Google"}
                </button>
                {dev_login}
            </div>
        </div>
    }
}

/// OAuth bypass for local development; compiled out of release builds and
/// rejected server-side outside development deployments.
#[cfg(debug_assertions)]
#[function_component(DevLogin)]
fn dev_login() -> Html {
    use crate::auth::{use_auth, AuthAction};
    use wasm_bindgen_futures::spawn_local;

    let auth = use_auth();
    let navigator = use_navigator().expect("Login must be rendered inside a router");

    let onclick = Callback::from(move |_| {
        let auth = auth.clone();
        let navigator = navigator.clone();
        spawn_local(async move {
            match AuthService::new().test_token("test@example.com").await {
                Ok(issued) => {
                    auth.dispatch(AuthAction::CredentialsIssued {
                        access_token: issued.access_token,
                        refresh_token: issued.refresh_token,
                        user: issued.user,
                    });
                    navigator.push(&Route::Home);
                }
                Err(err) => log::error!("test token issuance failed: {err}"),
            }
        });
    });

    html! {
        <button
            {onclick}
            class="w-full mt-3 px-4 py-2 text-sm rounded-lg border border-gray-300 text-gray-600 hover:bg-gray-100 transition-colors"
        >
            {"Use test token (dev)"}
        </button>
    }
}
