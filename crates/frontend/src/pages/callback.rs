//! OAuth callback page
//!
//! Single pass: extract tokens from the redirect URL, commit them to the
//! session, fetch the profile, then land on the authenticated home or back on
//! login.

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::auth::{use_auth, AuthAction};
use crate::components::Spinner;
use crate::config::{AppConfig, ProfileFailurePolicy};
use crate::services::AuthService;

/// Token material delivered via redirect query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Parse `token` (and `refresh_token`) out of a callback query string.
///
/// Returns `None` when a required parameter is missing; the caller then
/// routes back to login without touching the session.
pub fn extract_callback_tokens(query: &str, require_refresh_token: bool) -> Option<CallbackTokens> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut access_token = None;
    let mut refresh_token = None;

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "token" if !value.is_empty() => access_token = Some(value.into_owned()),
            "refresh_token" if !value.is_empty() => refresh_token = Some(value.into_owned()),
            _ => {}
        }
    }

    let access_token = access_token?;
    if require_refresh_token && refresh_token.is_none() {
        return None;
    }

    Some(CallbackTokens {
        access_token,
        refresh_token,
    })
}

#[function_component(AuthCallback)]
pub fn auth_callback() -> Html {
    let auth = use_auth();
    let navigator = use_navigator().expect("AuthCallback must be rendered inside a router");

    use_effect_with((), move |_| {
        let search = gloo::utils::window().location().search().unwrap_or_default();

        let Some(tokens) = extract_callback_tokens(&search, AppConfig::refresh_tokens_enabled())
        else {
            log::error!("no tokens found in callback URL");
            navigator.push(&Route::Login);
            return;
        };

        auth.dispatch(AuthAction::TokensReceived {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        });

        spawn_local(async move {
            match AuthService::new().fetch_profile().await {
                Ok(user) => {
                    auth.dispatch(AuthAction::UserLoaded(user));
                    navigator.push(&Route::Home);
                }
                Err(err) => {
                    log::error!("failed to fetch user info: {err}");
                    if AppConfig::PROFILE_FAILURE_POLICY == ProfileFailurePolicy::ClearTokens {
                        auth.dispatch(AuthAction::Logout);
                    }
                    navigator.push(&Route::Login);
                }
            }
        });
    });

    html! {
        <div class="min-h-screen flex items-center justify-center">
            <Spinner label={"Logging in..."} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_token_pair() {
        let tokens = extract_callback_tokens("?token=abc&refresh_token=xyz", true).unwrap();
        assert_eq!(tokens.access_token, "abc");
        assert_eq!(tokens.refresh_token.as_deref(), Some("xyz"));
    }

    #[test]
    fn empty_query_yields_nothing() {
        assert_eq!(extract_callback_tokens("", true), None);
        assert_eq!(extract_callback_tokens("?", false), None);
        assert_eq!(extract_callback_tokens("?other=1", false), None);
    }

    #[test]
    fn refresh_token_required_when_enabled() {
        assert_eq!(extract_callback_tokens("?token=abc", true), None);
    }

    #[test]
    fn single_token_mode_accepts_access_token_alone() {
        let tokens = extract_callback_tokens("?token=abc", false).unwrap();
        assert_eq!(tokens.access_token, "abc");
        assert_eq!(tokens.refresh_token, None);
    }

    #[test]
    fn percent_encoded_values_are_decoded() {
        let tokens = extract_callback_tokens("token=a%2Bb&refresh_token=x%3Dy", true).unwrap();
        assert_eq!(tokens.access_token, "a+b");
        assert_eq!(tokens.refresh_token.as_deref(), Some("x=y"));
    }

    #[test]
    fn empty_parameter_values_count_as_missing() {
        assert_eq!(extract_callback_tokens("?token=&refresh_token=xyz", true), None);
    }
}
