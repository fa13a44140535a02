//! Upload panel: file pick, validation feedback, and submission.

use crate::app::api::ApiCtx;
use crate::core::error::ApiError;
use crate::features::upload::logic::{
    UploadError, interpret_upload, validate_file, validate_submission,
};
use crate::features::upload::state::{PickedFile, UploadOutcome, UploadPhase, UploadState};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct UploadPanelProps {
    /// Template chosen in the picker, forwarded unvalidated.
    #[prop_or_default]
    pub template_id: Option<i64>,
    pub on_outcome: Callback<UploadOutcome>,
}

#[function_component(UploadPanel)]
pub(crate) fn upload_panel(props: &UploadPanelProps) -> Html {
    let state = use_state(UploadState::default);
    let picked = use_mut_ref(|| None::<web_sys::File>);
    let api_ctx = use_context::<ApiCtx>();
    let template_id = props.template_id;

    let on_file_change = {
        let state = state.clone();
        let picked = picked.clone();
        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() else {
                return;
            };
            let Some(file) = input.files().and_then(|list| list.get(0)) else {
                return;
            };
            let mut next = (*state).clone();
            let size_bytes = file.size() as u64;
            match validate_file(&file.name(), size_bytes) {
                Ok(()) => {
                    next.accept_file(PickedFile {
                        name: file.name(),
                        size_bytes,
                    });
                    *picked.borrow_mut() = Some(file);
                }
                Err(err) => next.fail(err.user_message()),
            }
            state.set(next);
        })
    };

    let on_submit = {
        let state = state.clone();
        let picked = picked.clone();
        let api_ctx = api_ctx.clone();
        let on_outcome = props.on_outcome.clone();
        Callback::from(move |_| {
            let metadata = state
                .file
                .as_ref()
                .map(|file| (file.name.clone(), file.size_bytes));
            if let Err(err) = validate_submission(
                metadata.as_ref().map(|(name, size)| (name.as_str(), *size)),
                template_id,
            ) {
                let mut next = (*state).clone();
                next.fail(err.user_message());
                state.set(next);
                return;
            }
            let (Some(api_ctx), Some(file), Some(template_id)) =
                (api_ctx.clone(), picked.borrow().clone(), template_id)
            else {
                return;
            };
            let mut next = (*state).clone();
            next.begin();
            state.set(next.clone());
            let state = state.clone();
            let on_outcome = on_outcome.clone();
            yew::platform::spawn_local(async move {
                let result = api_ctx
                    .client
                    .upload_dataset(&file, template_id)
                    .await
                    .map_err(UploadError::from)
                    .and_then(interpret_upload);
                match result {
                    Ok(outcome) => {
                        next.finish(outcome);
                        state.set(next);
                        on_outcome.emit(outcome);
                    }
                    // Expiry already cleared the session and navigated.
                    Err(UploadError::Api(ApiError::SessionExpired)) => {}
                    Err(err) => {
                        next.fail(err.user_message());
                        state.set(next);
                    }
                }
            });
        })
    };

    let busy = state.is_busy();
    let file_label = state.file.as_ref().map_or_else(
        || "Click to choose a file".to_string(),
        |file| file.name.clone(),
    );
    let banner = match &state.phase {
        UploadPhase::Idle => None,
        UploadPhase::Busy => Some(("info", "Uploading and processing file...".to_string())),
        UploadPhase::Done(UploadOutcome::ReportReady { .. }) => {
            Some(("success", "Report generated successfully!".to_string()))
        }
        UploadPhase::Done(UploadOutcome::FileStored { .. }) => {
            Some(("success", "File uploaded successfully!".to_string()))
        }
        UploadPhase::Failed(message) => Some(("error", message.clone())),
    };

    html! {
        <section class="upload-panel">
            <h3>{"Upload Your Data File"}</h3>
            <p class="muted">{"Supported formats: .xlsx, .xls, .csv (Max 50MB)"}</p>
            <label class="drop-area">
                <span class={classes!(state.file.is_some().then_some("picked"))}>{file_label}</span>
                <input
                    type="file"
                    accept=".xlsx,.xls,.csv"
                    class="hidden"
                    onchange={on_file_change}
                />
            </label>
            <button
                class="solid"
                disabled={busy || state.file.is_none() || template_id.is_none()}
                onclick={on_submit}
            >
                {if busy { "Processing..." } else { "Generate Report" }}
            </button>
            {if let Some((kind, message)) = banner {
                html! { <div class={classes!("banner", kind)}>{message}</div> }
            } else { html! {} }}
        </section>
    }
}
