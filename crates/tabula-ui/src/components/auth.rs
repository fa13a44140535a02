//! Login and registration screens.
//!
//! # Design
//! - Both modes share one form; register simply adds the optional name
//!   field and both auto-authenticate on success.
//! - Failures propagate untouched from the gateway into the inline error;
//!   nothing is retried automatically.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::app::preferences::persist_token;
use crate::core::error::ApiError;
use crate::core::session::SessionPhase;
use crate::core::store::{AppStore, begin_auth, complete_auth, fail_auth};
use tabula_api_models::decode_claims;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

/// Which credentials flow the screen drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AuthMode {
    /// Exchange existing credentials for a session.
    Login,
    /// Create an account, then authenticate with the returned token.
    Register,
}

#[derive(Properties, PartialEq)]
pub(crate) struct AuthScreenProps {
    pub mode: AuthMode,
}

#[function_component(AuthScreen)]
pub(crate) fn auth_screen(props: &AuthScreenProps) -> Html {
    let mode = props.mode;
    let dispatch = Dispatch::<AppStore>::new();
    let session = use_selector(|store: &AppStore| store.session.clone());
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let name = use_state(String::new);

    if session.is_authenticated() {
        return html! { <Redirect<Route> to={Route::Dashboard} /> };
    }

    let busy = session.phase == SessionPhase::Authenticating;
    let submit = {
        let dispatch = dispatch.clone();
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let email = email.clone();
        let password = password.clone();
        let name = name.clone();
        Callback::from(move |_| {
            let Some(api_ctx) = api_ctx.clone() else {
                return;
            };
            let dispatch = dispatch.clone();
            let navigator = navigator.clone();
            let email = (*email).clone();
            let password = (*password).clone();
            let name = (*name).clone();
            dispatch.reduce_mut(|store| begin_auth(&mut store.session));
            yew::platform::spawn_local(async move {
                let client = api_ctx.client;
                let result = match mode {
                    AuthMode::Login => client.login(&email, &password).await,
                    AuthMode::Register => {
                        let name = if name.trim().is_empty() { None } else { Some(name) };
                        client.register(&email, &password, name).await
                    }
                };
                match result {
                    Ok(token) => match decode_claims(&token) {
                        Ok(claims) => {
                            persist_token(&token);
                            dispatch.reduce_mut(move |store| {
                                complete_auth(&mut store.session, token, claims.into());
                            });
                            if let Some(navigator) = &navigator {
                                navigator.push(&Route::Dashboard);
                            }
                        }
                        Err(_) => dispatch.reduce_mut(|store| {
                            fail_auth(
                                &mut store.session,
                                ApiError::UnexpectedResponse.user_message(),
                            );
                        }),
                    },
                    Err(err) => dispatch.reduce_mut(move |store| {
                        fail_auth(&mut store.session, err.user_message());
                    }),
                }
            });
        })
    };

    let bind = |handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                handle.set(input.value());
            }
        })
    };

    let (title, action, alt) = match mode {
        AuthMode::Login => (
            "Sign in",
            "Sign in",
            html! {
                <p class="muted">
                    {"Need an account? "}
                    <Link<Route> to={Route::Register}>{"Register"}</Link<Route>>
                </p>
            },
        ),
        AuthMode::Register => (
            "Create account",
            "Register",
            html! {
                <p class="muted">
                    {"Already registered? "}
                    <Link<Route> to={Route::Login}>{"Sign in"}</Link<Route>>
                </p>
            },
        ),
    };

    html! {
        <div class="auth-screen">
            <div class="card">
                <header>
                    <h2>{title}</h2>
                </header>
                <label class="stack">
                    <span>{"Email"}</span>
                    <input type="email" value={(*email).clone()} oninput={bind(&email)} />
                </label>
                <label class="stack">
                    <span>{"Password"}</span>
                    <input type="password" value={(*password).clone()} oninput={bind(&password)} />
                </label>
                {if mode == AuthMode::Register {
                    html! {
                        <label class="stack">
                            <span>{"Name (optional)"}</span>
                            <input type="text" value={(*name).clone()} oninput={bind(&name)} />
                        </label>
                    }
                } else { html! {} }}
                {if let Some(err) = &session.error {
                    html! { <p class="error-text">{err.clone()}</p> }
                } else { html! {} }}
                <div class="actions">
                    <button class="solid" disabled={busy} onclick={submit}>
                        {if busy { "Working..." } else { action }}
                    </button>
                </div>
                {alt}
            </div>
        </div>
    }
}
