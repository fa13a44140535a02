//! Report history listing for the dashboard.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::features::history::state::{HistoryPhase, history_from_envelope, history_from_error};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(HistoryList)]
pub(crate) fn history_list() -> Html {
    let phase = use_state(|| HistoryPhase::Loading);
    let api_ctx = use_context::<ApiCtx>();

    {
        let phase = phase.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(api_ctx) = api_ctx {
                    yew::platform::spawn_local(async move {
                        match api_ctx.client.fetch_history().await {
                            Ok(envelope) => phase.set(history_from_envelope(envelope)),
                            Err(err) => {
                                if let Some(next) = history_from_error(&err) {
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

    html! {
        <section class="history">
            <h3>{"Previous Reports"}</h3>
            {match &*phase {
                HistoryPhase::Loading => html! {
                    <div class="history-rows">
                        {for (0..2).map(|i| html! { <div key={i} class="row skeleton"></div> })}
                    </div>
                },
                HistoryPhase::Error(message) => html! {
                    <div class="error-box">{message.clone()}</div>
                },
                HistoryPhase::Ready(reports) if reports.is_empty() => html! {
                    <p class="muted">{"No reports yet. Upload a file to generate one."}</p>
                },
                HistoryPhase::Ready(reports) => html! {
                    <div class="history-rows">
                        {for reports.iter().map(|summary| html! {
                            <div key={summary.report_id} class="row">
                                <span class="filename">{summary.filename.clone()}</span>
                                <span class="muted">
                                    {summary.upload_date.clone().unwrap_or_else(|| "-".to_string())}
                                </span>
                                <Link<Route> to={Route::Report { id: summary.report_id.to_string() }}>
                                    {"View report"}
                                </Link<Route>>
                            </div>
                        })}
                    </div>
                },
            }}
        </section>
    }
}
