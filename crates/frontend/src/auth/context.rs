//! Global authentication context and provider

use std::rc::Rc;

use picloop_http::session::{Session, SessionStore};
use picloop_http::types::UserProfile;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::client;

/// Authentication context data: a render-side mirror of the session store.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthContextData {
    pub session: Session,
    pub is_loading: bool,
}

impl Default for AuthContextData {
    fn default() -> Self {
        Self {
            session: Session::default(),
            // Start loading until the persisted session has been restored
            is_loading: true,
        }
    }
}

/// Authentication context actions
pub enum AuthAction {
    /// Persisted session read back at startup
    SessionRestored(Session),
    /// Tokens extracted from the OAuth callback URL
    TokensReceived {
        access_token: String,
        refresh_token: Option<String>,
    },
    /// Profile fetch completed
    UserLoaded(UserProfile),
    /// Development token issuance delivered the whole session in one step
    CredentialsIssued {
        access_token: String,
        refresh_token: Option<String>,
        user: UserProfile,
    },
    Logout,
}

/// Authentication context
pub type AuthContext = UseReducerHandle<AuthContextData>;

impl Reducible for AuthContextData {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let store = client::session_store();
        match action {
            AuthAction::SessionRestored(session) => Rc::new(Self {
                session,
                is_loading: false,
            }),
            AuthAction::TokensReceived {
                access_token,
                refresh_token,
            } => {
                store.set_access_token(Some(access_token));
                store.set_refresh_token(refresh_token);
                Rc::new(Self {
                    session: store.session(),
                    is_loading: self.is_loading,
                })
            }
            AuthAction::UserLoaded(user) => {
                store.set_user(Some(user));
                Rc::new(Self {
                    session: store.session(),
                    is_loading: false,
                })
            }
            AuthAction::CredentialsIssued {
                access_token,
                refresh_token,
                user,
            } => {
                store.set_access_token(Some(access_token));
                store.set_refresh_token(refresh_token);
                store.set_user(Some(user));
                Rc::new(Self {
                    session: store.session(),
                    is_loading: false,
                })
            }
            AuthAction::Logout => {
                store.logout();
                Rc::new(Self {
                    session: Session::default(),
                    is_loading: false,
                })
            }
        }
    }
}

/// Auth provider props
#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Children,
}

/// Auth provider component
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let auth_state = use_reducer(AuthContextData::default);
    let navigator = use_navigator().expect("AuthProvider must be rendered inside a router");

    // Restore the persisted session on mount
    {
        let auth_state = auth_state.clone();
        use_effect_with((), move |_| {
            let session = client::session_store().session();
            auth_state.dispatch(AuthAction::SessionRestored(session));
        });
    }

    // React to session termination from the HTTP client (failed refresh)
    {
        let auth_state = auth_state.clone();
        use_effect_with((), move |_| {
            let navigator = navigator.clone();
            super::expiry::listen_for_expiry(Rc::new(move || {
                auth_state.dispatch(AuthAction::Logout);
                navigator.push(&Route::Login);
            }));

            // Cleanup on unmount
            super::expiry::stop_listening_for_expiry
        });
    }

    html! {
        <ContextProvider<AuthContext> context={auth_state}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

/// Hook to use auth context
#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
        .expect("AuthContext not found. Make sure to wrap your component with AuthProvider")
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    let auth = use_auth();
    auth.session.is_authenticated()
}
