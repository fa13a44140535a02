//! Header shell for authenticated screens.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct AppHeaderProps {
    /// Email of the signed-in user, when known.
    #[prop_or_default]
    pub email: Option<String>,
    pub on_logout: Callback<()>,
}

#[function_component(AppHeader)]
pub(crate) fn app_header(props: &AppHeaderProps) -> Html {
    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };
    html! {
        <header class="app-header">
            <span class="brand">{"Tabula"}</span>
            <div class="session-controls">
                {if let Some(email) = &props.email {
                    html! { <span class="muted">{email.clone()}</span> }
                } else { html! {} }}
                <button class="ghost" onclick={on_logout}>{"Logout"}</button>
            </div>
        </header>
    }
}
