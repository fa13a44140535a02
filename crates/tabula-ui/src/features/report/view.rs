//! Report dashboard: tabbed projection of a fetched report.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::features::report::logic::{
    column_names, has_section, insight_lines, phase_from_envelope, phase_from_error, row_count,
    summary_rows,
};
use crate::features::report::state::{ReportPhase, ReportState};
use serde_json::Value;
use tabula_api_models::Report;
use yew::prelude::*;
use yew_router::prelude::*;

/// Tabs over the opaque report payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReportTab {
    Overview,
    Visualizations,
    AiInsights,
    RawData,
}

impl ReportTab {
    const ALL: [Self; 4] = [
        Self::Overview,
        Self::Visualizations,
        Self::AiInsights,
        Self::RawData,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Visualizations => "Visualizations",
            Self::AiInsights => "AI Insights",
            Self::RawData => "Raw Data",
        }
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ReportViewProps {
    /// Identifier of the report to fetch and render.
    pub id: i64,
}

#[function_component(ReportView)]
pub(crate) fn report_view(props: &ReportViewProps) -> Html {
    let machine = use_mut_ref(ReportState::default);
    let phase = use_state(|| ReportPhase::Loading);
    let tab = use_state(|| ReportTab::Overview);
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();

    {
        let machine = machine.clone();
        let phase = phase.clone();
        use_effect_with_deps(
            move |id: &i64| {
                let id = *id;
                let epoch = machine.borrow_mut().begin_fetch();
                phase.set(ReportPhase::Loading);
                if let Some(api_ctx) = api_ctx {
                    yew::platform::spawn_local(async move {
                        let settled = match api_ctx.client.fetch_report(id).await {
                            Ok(envelope) => Some(phase_from_envelope(envelope)),
                            Err(err) => phase_from_error(&err),
                        };
                        let mut machine = machine.borrow_mut();
                        machine.settle(epoch, settled);
                        phase.set(machine.phase.clone());
                    });
                }
                || ()
            },
            props.id,
        );
    }

    let back = {
        let navigator = navigator.clone();
        Callback::from(move |_| {
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Dashboard);
            }
        })
    };

    match &*phase {
        ReportPhase::Loading => html! {
            <div class="report-skeleton">
                <div class="pulse-bar wide"></div>
                <div class="pulse-bar"></div>
            </div>
        },
        ReportPhase::Error(message) => html! {
            <div class="report-screen">
                <div class="error-box">{message.clone()}</div>
                <button class="ghost" onclick={back}>{"Back to Upload"}</button>
            </div>
        },
        ReportPhase::Empty => html! {
            <div class="report-screen">
                <div class="empty-state">
                    <h2>{"No report data available"}</h2>
                    <p class="muted">{"The file was accepted but no report was produced."}</p>
                </div>
                <button class="solid" onclick={back}>{"Start over"}</button>
            </div>
        },
        ReportPhase::Ready(report) => {
            let active = *tab;
            let set_tab = |next: ReportTab| {
                let tab = tab.clone();
                Callback::from(move |_| tab.set(next))
            };
            html! {
                <div class="report-screen">
                    <header class="report-header">
                        <div>
                            <h1>{"Analytics Dashboard"}</h1>
                            <div class="report-meta muted">
                                <span>{format!("Report ID: {}", report.id)}</span>
                                <span>{format!("File: {}", report.filename)}</span>
                                <span>{format!("Uploaded: {}", report.upload_date_label())}</span>
                            </div>
                        </div>
                        <button class="ghost" onclick={back.clone()}>{"Back to Upload"}</button>
                    </header>
                    <nav class="tab-bar">
                        {for ReportTab::ALL.iter().map(|entry| html! {
                            <button
                                class={classes!("tab", (active == *entry).then_some("active"))}
                                onclick={set_tab(*entry)}
                            >
                                {entry.label()}
                            </button>
                        })}
                    </nav>
                    {render_tab(active, report)}
                </div>
            }
        }
    }
}

fn render_tab(tab: ReportTab, report: &Report) -> Html {
    let data = &report.report_data;
    match tab {
        ReportTab::Overview => render_overview(data),
        ReportTab::Visualizations => render_section(
            data,
            "visualizations",
            "No visualizations were generated for this dataset.",
        ),
        ReportTab::AiInsights => render_section(
            data,
            "ai_analysis",
            "No AI analysis was generated for this dataset.",
        ),
        ReportTab::RawData => html! {
            <pre class="raw-data">
                {serde_json::to_string_pretty(data).unwrap_or_default()}
            </pre>
        },
    }
}

fn render_overview(data: &Value) -> Html {
    let rows = summary_rows(data);
    let columns = column_names(data);
    let insights = insight_lines(data);
    html! {
        <section class="overview">
            <div class="stat-cards">
                {if let Some(count) = row_count(data) {
                    html! { <div class="card stat"><span class="stat-value">{count}</span><span class="muted">{"Rows"}</span></div> }
                } else { html! {} }}
                <div class="card stat">
                    <span class="stat-value">{columns.len()}</span>
                    <span class="muted">{"Columns"}</span>
                </div>
            </div>
            {if rows.is_empty() {
                html! { <p class="muted">{"No numeric columns were found."}</p> }
            } else {
                html! {
                    <table class="stat-table">
                        <thead>
                            <tr>
                                <th>{"Column"}</th>
                                <th>{"Count"}</th>
                                <th>{"Mean"}</th>
                                <th>{"Min"}</th>
                                <th>{"Max"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for rows.iter().map(|row| html! {
                                <tr key={row.column.clone()}>
                                    <td>{row.column.clone()}</td>
                                    <td>{format_cell(row.count)}</td>
                                    <td>{format_cell(row.mean)}</td>
                                    <td>{format_cell(row.min)}</td>
                                    <td>{format_cell(row.max)}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                }
            }}
            {if insights.is_empty() { html! {} } else {
                html! {
                    <div class="insights">
                        <h3>{"Insights"}</h3>
                        <ul>
                            {for insights.iter().map(|line| html! { <li>{line.clone()}</li> })}
                        </ul>
                    </div>
                }
            }}
        </section>
    }
}

fn render_section(data: &Value, key: &str, empty_note: &str) -> Html {
    if has_section(data, key) {
        let entries: Vec<String> = data
            .get(key)
            .and_then(Value::as_object)
            .map(|section| section.keys().cloned().collect())
            .unwrap_or_default();
        html! {
            <section class="section-list">
                <ul>
                    {for entries.iter().map(|entry| html! {
                        <li key={entry.clone()}><span class="pill">{entry.clone()}</span></li>
                    })}
                </ul>
            </section>
        }
    } else {
        html! { <p class="muted">{empty_note.to_string()}</p> }
    }
}

fn format_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value:.2}"))
}
