//! App shell: routing, session bootstrap, and expiry policy wiring.
//!
//! # Design
//! - The session is restored from storage exactly once per boot, before
//!   any screen decides what to render.
//! - The 401 expiry policy is registered here so the gateway can clear
//!   the session and navigate without features duplicating the check.
//! - Screens gate themselves on the session phase; unauthenticated users
//!   are redirected to login without a network call.

use crate::app::api::ApiCtx;
use crate::app::preferences::{api_base_url, clear_token, load_token};
use crate::components::auth::{AuthMode, AuthScreen};
use crate::components::shell::AppHeader;
use crate::components::toast::ToastHost;
use crate::core::session::{Restored, SessionPhase, restore_session};
use crate::core::store::{AppStore, apply_restored, clear_session};
use crate::features::history::view::HistoryList;
use crate::features::report::view::ReportView;
use crate::features::templates::view::TemplatePicker;
use crate::features::upload::state::UploadOutcome;
use crate::features::upload::view::UploadPanel;
use crate::models::{Toast, ToastKind};
pub(crate) use routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

pub(crate) mod api;
pub(crate) mod preferences;
mod routes;

#[function_component(TabulaApp)]
fn tabula_app() -> Html {
    html! {
        <BrowserRouter>
            <AppRoot />
        </BrowserRouter>
    }
}

#[function_component(AppRoot)]
fn app_root() -> Html {
    let dispatch = Dispatch::<AppStore>::new();
    let api_ctx = use_memo(|_| ApiCtx::new(api_base_url()), ());
    let token = use_selector(|store: &AppStore| store.session.token.clone());
    let navigator = use_navigator();
    let toasts = use_state(Vec::<Toast>::new);
    let toast_id = use_state(|| 0u64);

    {
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |_| {
                let restored = restore_session(load_token().as_deref());
                if restored == Restored::Corrupt {
                    clear_token();
                }
                dispatch.reduce_mut(|store| apply_restored(&mut store.session, restored));
                || ()
            },
            (),
        );
    }
    {
        let api_ctx = (*api_ctx).clone();
        use_effect_with_deps(
            move |token: &std::rc::Rc<Option<String>>| {
                api_ctx.client.set_token((**token).clone());
                || ()
            },
            token,
        );
    }
    {
        let api_ctx = (*api_ctx).clone();
        let dispatch = dispatch.clone();
        let navigator = navigator.clone();
        use_effect_with_deps(
            move |_| {
                api_ctx.client.set_expiry_handler(Callback::from(move |()| {
                    clear_token();
                    dispatch.reduce_mut(|store| clear_session(&mut store.session));
                    if let Some(navigator) = &navigator {
                        navigator.push(&Route::Login);
                    }
                }));
                || ()
            },
            (),
        );
    }

    let notify = {
        let toasts = toasts.clone();
        let toast_id = toast_id.clone();
        Callback::from(move |(kind, message): (ToastKind, String)| {
            push_toast(&toasts, &toast_id, kind, message);
        })
    };
    let dismiss_toast = {
        let toasts = toasts.clone();
        Callback::from(move |id: u64| {
            toasts.set(
                (*toasts)
                    .iter()
                    .cloned()
                    .filter(|toast| toast.id != id)
                    .collect(),
            );
        })
    };

    let notify_routes = notify.clone();
    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <Switch<Route> render={move |route| {
                let notify = notify_routes.clone();
                match route {
                    Route::Home => html! { <HomeRedirect /> },
                    Route::Login => html! { <AuthScreen mode={AuthMode::Login} /> },
                    Route::Register => html! { <AuthScreen mode={AuthMode::Register} /> },
                    Route::Dashboard => html! {
                        <RequireSession>
                            <DashboardScreen on_notify={notify} />
                        </RequireSession>
                    },
                    Route::Report { id } => match id.parse::<i64>() {
                        Ok(id) => html! {
                            <RequireSession>
                                <ReportView {id} />
                            </RequireSession>
                        },
                        Err(_) => html! { <NotFoundScreen /> },
                    },
                    Route::NotFound => html! { <NotFoundScreen /> },
                }
            }} />
            <ToastHost toasts={(*toasts).clone()} on_dismiss={dismiss_toast} />
        </ContextProvider<ApiCtx>>
    }
}

#[derive(Properties, PartialEq)]
struct RequireSessionProps {
    pub children: Children,
}

/// Gate children on an authenticated session: skeleton while the stored
/// token is being inspected, redirect to login when none is held.
#[function_component(RequireSession)]
fn require_session(props: &RequireSessionProps) -> Html {
    let session = use_selector(|store: &AppStore| store.session.clone());
    match session.phase {
        SessionPhase::Initializing => html! { <BootSkeleton /> },
        SessionPhase::Authenticated => html! { <>{for props.children.iter()}</> },
        SessionPhase::Unauthenticated | SessionPhase::Authenticating => html! {
            <Redirect<Route> to={Route::Login} />
        },
    }
}

/// Entry route: forward to the dashboard or the login screen.
#[function_component(HomeRedirect)]
fn home_redirect() -> Html {
    let session = use_selector(|store: &AppStore| store.session.clone());
    match session.phase {
        SessionPhase::Initializing => html! { <BootSkeleton /> },
        SessionPhase::Authenticated => html! { <Redirect<Route> to={Route::Dashboard} /> },
        SessionPhase::Unauthenticated | SessionPhase::Authenticating => html! {
            <Redirect<Route> to={Route::Login} />
        },
    }
}

#[function_component(BootSkeleton)]
fn boot_skeleton() -> Html {
    html! {
        <div class="boot-skeleton">
            <div class="pulse-circle"></div>
            <div class="pulse-bar"></div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct DashboardProps {
    pub on_notify: Callback<(ToastKind, String)>,
}

/// Authenticated landing screen: template choice, upload, and history.
#[function_component(DashboardScreen)]
fn dashboard_screen(props: &DashboardProps) -> Html {
    let dispatch = Dispatch::<AppStore>::new();
    let session = use_selector(|store: &AppStore| store.session.clone());
    let navigator = use_navigator();
    let selected_template = use_state(|| None::<i64>);

    let on_select = {
        let selected_template = selected_template.clone();
        Callback::from(move |id: i64| selected_template.set(Some(id)))
    };
    let on_outcome = {
        let navigator = navigator.clone();
        let on_notify = props.on_notify.clone();
        Callback::from(move |outcome: UploadOutcome| match outcome {
            UploadOutcome::ReportReady { report_id } => {
                on_notify.emit((ToastKind::Success, "Report generated successfully!".to_string()));
                if let Some(navigator) = &navigator {
                    navigator.push(&Route::Report {
                        id: report_id.to_string(),
                    });
                }
            }
            UploadOutcome::FileStored { .. } => {
                on_notify.emit((ToastKind::Success, "File uploaded successfully!".to_string()));
            }
        })
    };
    let on_logout = {
        let navigator = navigator.clone();
        Callback::from(move |()| {
            clear_token();
            dispatch.reduce_mut(|store| clear_session(&mut store.session));
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    let email = session.identity.as_ref().map(|who| who.email.clone());
    html! {
        <div class="dashboard">
            <AppHeader {email} {on_logout} />
            <main class="dashboard-body">
                <h1>{"Automated Report System"}</h1>
                <p class="muted">{"Upload a data file, pick a template, and explore the generated report."}</p>
                <TemplatePicker selected={*selected_template} {on_select} />
                <UploadPanel template_id={*selected_template} {on_outcome} />
                <HistoryList />
            </main>
        </div>
    }
}

#[function_component(NotFoundScreen)]
fn not_found_screen() -> Html {
    html! {
        <div class="placeholder">
            <h2>{"Not found"}</h2>
            <p class="muted">{"Use navigation to return to a supported view."}</p>
            <Link<Route> to={Route::Home}>{"Back to start"}</Link<Route>>
        </div>
    }
}

fn push_toast(
    toasts: &UseStateHandle<Vec<Toast>>,
    next_id: &UseStateHandle<u64>,
    kind: ToastKind,
    message: String,
) {
    let id = **next_id + 1;
    next_id.set(id);
    let mut list = (**toasts).clone();
    list.push(Toast { id, message, kind });
    if list.len() > 4 {
        let drain = list.len() - 4;
        list.drain(0..drain);
    }
    toasts.set(list);
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<TabulaApp>::with_root(root).render();
    } else {
        yew::Renderer::<TabulaApp>::new().render();
    }
}
