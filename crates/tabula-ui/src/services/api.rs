//! HTTP client for the Tabula service API.
//!
//! # Design
//! - One client per app boot; auth state is updated via interior
//!   mutability so the instance never needs rebuilding.
//! - Failure classification happens here and nowhere else: features
//!   receive typed [`ApiError`]s and never inspect status codes.
//! - A 401 on an authenticated call fires the registered expiry handler
//!   exactly once for that call and yields `SessionExpired`; login and
//!   register are public calls and propagate their failures untouched.

use crate::core::error::{ApiError, ApiResult, classify_status};
use gloo::console;
use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use tabula_api_models::{
    AuthResponse, ErrorBody, LoginRequest, RegisterRequest, ReportEnvelope, ReportListEnvelope,
    TemplatesEnvelope, UploadResponse,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, File, FormData, Headers, RequestInit, RequestMode};
use yew::Callback;

/// Upload requests tolerate synchronous server-side analysis.
const UPLOAD_TIMEOUT_MS: u32 = 60_000;

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(_) => Self::UnexpectedResponse,
            _ => Self::Unreachable,
        }
    }
}

/// Shared API client attached to every outbound call.
pub(crate) struct ApiClient {
    base_url: String,
    token: RefCell<Option<String>>,
    on_expired: RefCell<Option<Callback<()>>>,
}

impl ApiClient {
    /// Create a client for the given API origin.
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: RefCell::new(None),
            on_expired: RefCell::new(None),
        }
    }

    /// Mirror the session token held by the store.
    pub(crate) fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    /// Register the policy invoked when the server reports session expiry.
    /// The handler clears the session and navigates to login.
    pub(crate) fn set_expiry_handler(&self, handler: Callback<()>) {
        *self.on_expired.borrow_mut() = Some(handler);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    fn bearer_header(&self) -> ApiResult<String> {
        self.token
            .borrow()
            .as_ref()
            .map(|token| format!("Bearer {token}"))
            .ok_or(ApiError::MissingToken)
    }

    async fn body_detail(response: &Response) -> Option<String> {
        response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail().map(str::to_string))
    }

    /// Classify a non-success authenticated status, firing the expiry
    /// handler when the session was rejected.
    fn classify_and_notify(&self, status: u16, detail: Option<String>) -> ApiError {
        let err = classify_status(status, detail);
        if err == ApiError::SessionExpired
            && let Some(handler) = self.on_expired.borrow().as_ref()
        {
            handler.emit(());
        }
        err
    }

    /// Classify a settled authenticated response. 401 invalidates the
    /// session through the registered handler.
    async fn check(&self, response: Response) -> ApiResult<Response> {
        let status = response.status();
        if (200..=299).contains(&status) {
            return Ok(response);
        }
        let detail = Self::body_detail(&response).await;
        Err(self.classify_and_notify(status, detail))
    }

    /// Classify a settled public response. A 401 here means rejected
    /// credentials, not an expired session.
    async fn check_public(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if (200..=299).contains(&status) {
            return Ok(response);
        }
        let detail = Self::body_detail(&response).await;
        Err(ApiError::Server { status, detail })
    }

    async fn get_authed<T: for<'de> serde::Deserialize<'de>>(&self, path: &str) -> ApiResult<T> {
        let auth = self.bearer_header()?;
        let response = Request::get(&self.url(path))
            .header("Authorization", &auth)
            .send()
            .await?;
        let response = self.check(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post_auth(&self, path: &str, body: &impl serde::Serialize) -> ApiResult<String> {
        let request = Request::post(&self.url(path)).json(body)?;
        let response = request.send().await?;
        let response = Self::check_public(response).await?;
        let body: AuthResponse = response.json().await?;
        Ok(body.token)
    }

    /// Exchange credentials for a session token.
    pub(crate) async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        self.post_auth(
            "/api/auth/login",
            &LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await
    }

    /// Create an account; the server auto-authenticates on success.
    pub(crate) async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> ApiResult<String> {
        self.post_auth(
            "/api/auth/register",
            &RegisterRequest {
                email: email.to_string(),
                password: password.to_string(),
                name,
            },
        )
        .await
    }

    /// Fetch the selectable report templates.
    pub(crate) async fn fetch_templates(&self) -> ApiResult<TemplatesEnvelope> {
        self.get_authed("/api/templates").await
    }

    /// Fetch the user's report history, most recent first.
    pub(crate) async fn fetch_history(&self) -> ApiResult<ReportListEnvelope> {
        self.get_authed("/api/reports").await
    }

    /// Fetch one report by id.
    pub(crate) async fn fetch_report(&self, id: i64) -> ApiResult<ReportEnvelope> {
        self.get_authed(&format!("/api/reports/{id}")).await
    }

    /// Submit a dataset and template choice as one multipart request.
    ///
    /// Uses a raw fetch so the call can carry an abort signal: the request
    /// is aborted after [`UPLOAD_TIMEOUT_MS`], and an abort settles as
    /// `Unreachable`, the same as any other absent response.
    pub(crate) async fn upload_dataset(
        &self,
        file: &File,
        template_id: i64,
    ) -> ApiResult<UploadResponse> {
        let auth = self.bearer_header()?;
        let form = build_upload_form(file, template_id)?;

        let window = web_sys::window().ok_or(ApiError::Unreachable)?;
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::Cors);
        init.set_body(&form);
        let headers = Headers::new().map_err(|_| ApiError::Unreachable)?;
        headers
            .set("Authorization", &auth)
            .map_err(|_| ApiError::Unreachable)?;
        init.set_headers(&headers);

        let controller = AbortController::new().ok();
        let abort_timer = controller.as_ref().map(|ctrl| {
            let ctrl = ctrl.clone();
            Timeout::new(UPLOAD_TIMEOUT_MS, move || ctrl.abort())
        });
        if let Some(ctrl) = &controller {
            init.set_signal(Some(&ctrl.signal()));
        }

        let request =
            web_sys::Request::new_with_str_and_init(&self.url("/api/reports/upload"), &init)
                .map_err(|_| ApiError::Unreachable)?;
        let fetched = JsFuture::from(window.fetch_with_request(&request)).await;
        drop(abort_timer);
        let response: web_sys::Response = fetched
            .map_err(|_| ApiError::Unreachable)?
            .dyn_into()
            .map_err(|_| ApiError::Unreachable)?;

        let status = response.status();
        let text = fetch_response_text(&response).await;
        if !response.ok() {
            let detail = text
                .and_then(|raw| serde_json::from_str::<ErrorBody>(&raw).ok())
                .and_then(|body| body.detail().map(str::to_string));
            return Err(self.classify_and_notify(status, detail));
        }
        text.and_then(|raw| serde_json::from_str(&raw).ok())
            .ok_or(ApiError::UnexpectedResponse)
    }
}

fn build_upload_form(file: &File, template_id: i64) -> ApiResult<FormData> {
    let form = FormData::new().map_err(|err| {
        console::error!("form-data init failed", format!("{err:?}"));
        ApiError::Unreachable
    })?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|err| {
            console::error!("form-data attach failed", format!("{err:?}"));
            ApiError::Unreachable
        })?;
    form.append_with_str("template_id", &template_id.to_string())
        .map_err(|err| {
            console::error!("form-data attach failed", format!("{err:?}"));
            ApiError::Unreachable
        })?;
    Ok(form)
}

async fn fetch_response_text(response: &web_sys::Response) -> Option<String> {
    let promise = response.text().ok()?;
    let value = JsFuture::from(promise).await.ok()?;
    value.as_string()
}
