//! HTTP client wrapping `gloo-net` for calls to the homehub backend.

use gloo_net::http::{Request, Response};
use homehub_app::ports::{ControlGateway, StatusSource};
use homehub_domain::backend::{
    CalendarEvent, IconPreview, RelayToggle, SwitchDevice, SwitchState, VoiceCommand, VoiceReply,
    control_path,
};
use homehub_domain::error::{BackendError, HomeHubError};
use homehub_domain::relay::RelayStatus;
use homehub_domain::settings::DashboardSettings;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use web_sys::RequestCache;

/// Error returned by API client methods.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl From<ApiError> for HomeHubError {
    fn from(err: ApiError) -> Self {
        BackendError::new(err.message).into()
    }
}

/// JSON error body returned by the backend on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Check the HTTP response status and extract an error if non-2xx.
async fn check_response(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP {}", resp.status()),
    };
    Err(ApiError { message })
}

/// Fetch the dashboard settings served next to the bundle.
pub async fn fetch_settings() -> Result<DashboardSettings, ApiError> {
    let resp = check_response(Request::get("/dashboard/settings").send().await?).await?;
    let settings: DashboardSettings = resp.json().await?;
    Ok(settings)
}

/// Fetch the settings, falling back to the built-in defaults when the host
/// does not serve them or serves invalid ones.
pub async fn fetch_settings_or_default() -> DashboardSettings {
    match fetch_settings().await {
        Ok(settings) => match settings.validate() {
            Ok(()) => settings,
            Err(err) => {
                leptos::logging::warn!("invalid dashboard settings, using defaults: {err}");
                DashboardSettings::default()
            }
        },
        Err(err) => {
            leptos::logging::warn!("dashboard settings unavailable, using defaults: {err}");
            DashboardSettings::default()
        }
    }
}

/// Backend client rooted at the configured `api_base`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base: String,
}

impl HttpBackend {
    pub fn new(api_base: &str) -> Self {
        Self {
            base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = Request::get(&self.url(path))
            .cache(RequestCache::NoStore)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(resp.json().await?)
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = check_response(Request::post(&self.url(path)).send().await?).await?;
        Ok(resp.json().await?)
    }
}

impl StatusSource for HttpBackend {
    async fn fetch_status(&self, max_relays: usize) -> Result<RelayStatus, HomeHubError> {
        let path = format!("/ipx/status?max_relays={max_relays}");
        Ok(self.get_json(&path).await?)
    }
}

impl ControlGateway for HttpBackend {
    async fn switch(
        &self,
        device: SwitchDevice,
        state: SwitchState,
    ) -> Result<serde_json::Value, HomeHubError> {
        Ok(self.post_empty(&control_path(device, state)).await?)
    }

    async fn voice_command(&self, text: &str) -> Result<VoiceReply, HomeHubError> {
        let body = VoiceCommand {
            text: text.to_string(),
        };
        let request = Request::post(&self.url("/voice/command"))
            .json(&body)
            .map_err(ApiError::from)?;
        let resp = check_response(request.send().await.map_err(ApiError::from)?).await?;
        Ok(resp.json().await.map_err(ApiError::from)?)
    }

    async fn next_event(&self) -> Result<CalendarEvent, HomeHubError> {
        Ok(self.get_json("/status/calendar/next").await?)
    }

    async fn upcoming_events(&self, limit: usize) -> Result<Vec<CalendarEvent>, HomeHubError> {
        let path = format!("/status/calendar/upcoming?limit={limit}");
        Ok(self.get_json(&path).await?)
    }

    async fn toggle_relay(&self, relay: usize) -> Result<RelayToggle, HomeHubError> {
        Ok(self.post_empty(&format!("/ipx/relays/{relay}/toggle")).await?)
    }

    async fn icon_preview(&self) -> Result<IconPreview, HomeHubError> {
        Ok(self.get_json("/status-icons/preview").await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_strip_trailing_slash_from_base() {
        let backend = HttpBackend::new("http://hub.local:8000/");
        assert_eq!(
            backend.url("/ipx/status?max_relays=32"),
            "http://hub.local:8000/ipx/status?max_relays=32"
        );
    }

    #[test]
    fn should_use_same_origin_for_empty_base() {
        let backend = HttpBackend::new("");
        assert_eq!(backend.url("/voice/command"), "/voice/command");
    }

    #[test]
    fn should_convert_api_error_into_backend_error() {
        let err: HomeHubError = ApiError {
            message: "HTTP 502".to_string(),
        }
        .into();
        assert_eq!(homehub_app::services::control_service::error_text(&err), "Error: HTTP 502");
    }
}
