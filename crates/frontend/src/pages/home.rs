//! Authenticated home page

use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::auth::use_auth;
use crate::components::{GalleryScope, ImageGrid, NavBar, Spinner};

#[function_component(Home)]
pub fn home() -> Html {
    let auth = use_auth();
    let scope = use_state(|| GalleryScope::Mine);

    // Wait for the persisted session to be restored before deciding where
    // the user belongs.
    if auth.is_loading {
        return html! { <Spinner label={"Loading..."} /> };
    }

    if !auth.session.is_authenticated() {
        return html! { <Redirect<Route> to={Route::Login} /> };
    }

    let greeting = auth
        .session
        .user
        .as_ref()
        .map(|user| user.name.clone().unwrap_or_else(|| user.email.clone()))
        .unwrap_or_else(|| "there".to_string());

    let tab = |target: GalleryScope, caption: &str| {
        let scope = scope.clone();
        let active = *scope == target;
        let class = if active {
            "px-3 py-1.5 text-sm rounded-lg bg-blue-600 text-white"
        } else {
            "px-3 py-1.5 text-sm rounded-lg bg-gray-100 text-gray-600 hover:bg-gray-200"
        };
        html! {
            <button {class} onclick={Callback::from(move |_| scope.set(target))}>
                {caption.to_string()}
            </button>
        }
    };

    html! {
        <div class="min-h-screen flex flex-col">
            <NavBar />
            <main class="flex-1 p-6">
                <h2 class="text-xl font-semibold mb-4">{format!("Welcome back, {greeting}")}</h2>
                <div class="flex gap-2 mb-6">
                    {tab(GalleryScope::Mine, "My uploads")}
                    {tab(GalleryScope::Public, "Public feed")}
                </div>
                <ImageGrid scope={*scope} />
            </main>
        </div>
    }
}
