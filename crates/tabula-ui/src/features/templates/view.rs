//! Template picker grid.

use crate::app::api::ApiCtx;
use crate::features::templates::state::{CatalogPhase, catalog_from_envelope, catalog_from_error};
use yew::prelude::*;

const DEFAULT_ICON: &str = "📊";

#[derive(Properties, PartialEq)]
pub(crate) struct TemplatePickerProps {
    /// Currently selected template id.
    #[prop_or_default]
    pub selected: Option<i64>,
    pub on_select: Callback<i64>,
}

#[function_component(TemplatePicker)]
pub(crate) fn template_picker(props: &TemplatePickerProps) -> Html {
    let phase = use_state(|| CatalogPhase::Loading);
    let api_ctx = use_context::<ApiCtx>();

    {
        let phase = phase.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(api_ctx) = api_ctx {
                    yew::platform::spawn_local(async move {
                        match api_ctx.client.fetch_templates().await {
                            Ok(envelope) => phase.set(catalog_from_envelope(envelope)),
                            Err(err) => {
                                if let Some(next) = catalog_from_error(&err) {
                                    phase.set(next);
                                }
                            }
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    match &*phase {
        CatalogPhase::Loading => html! {
            <div class="template-grid">
                {for (0..3).map(|i| html! { <div key={i} class="card skeleton"></div> })}
            </div>
        },
        CatalogPhase::Error(message) => html! {
            <div class="error-box">{message.clone()}</div>
        },
        CatalogPhase::Ready(templates) => html! {
            <section class="template-section">
                <h3>{"Select Report Template"}</h3>
                <div class="template-grid">
                    {for templates.iter().map(|template| {
                        let id = template.id;
                        let on_click = {
                            let on_select = props.on_select.clone();
                            Callback::from(move |_| on_select.emit(id))
                        };
                        let selected = props.selected == Some(id);
                        html! {
                            <div
                                key={id}
                                class={classes!("card", "template-card", selected.then_some("selected"))}
                                onclick={on_click}
                            >
                                <div class="template-title">
                                    <span class="icon">
                                        {template.icon.clone().unwrap_or_else(|| DEFAULT_ICON.to_string())}
                                    </span>
                                    <h4>{template.name.clone()}</h4>
                                </div>
                                <p class="muted">{template.description.clone()}</p>
                            </div>
                        }
                    })}
                </div>
            </section>
        },
    }
}
