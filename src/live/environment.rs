use crate::cookies::reader::{CookieNames, CookieReader};
use crate::cookies::source::CookieSource;
use crate::live::api::LiveApi;
use std::sync::Arc;

/// Everything the resolver would otherwise read from page globals.
///
/// Modeled after the page state `gtag` depends on: the `gtag` function, the
/// `dataLayer` array it pushes to, and `document.cookie`.
#[derive(Clone)]
pub struct AnalyticsEnvironment {
    live_api: Option<Arc<dyn LiveApi>>,
    data_layer: bool,
    cookies: Arc<dyn CookieSource>,
}

impl AnalyticsEnvironment {
    /// An environment with cookies only; no live API.
    pub fn new(cookies: Arc<dyn CookieSource>) -> Self {
        Self {
            live_api: None,
            data_layer: false,
            cookies,
        }
    }

    /// Install a live API. Also marks the data layer present, which is what
    /// a loaded `gtag` snippet does.
    pub fn with_live_api(mut self, api: Arc<dyn LiveApi>) -> Self {
        self.live_api = Some(api);
        self.data_layer = true;
        self
    }

    pub fn with_data_layer(mut self, present: bool) -> Self {
        self.data_layer = present;
        self
    }

    pub fn live_api(&self) -> Option<&Arc<dyn LiveApi>> {
        self.live_api.as_ref()
    }

    pub fn has_data_layer(&self) -> bool {
        self.data_layer
    }

    pub fn cookies(&self) -> &Arc<dyn CookieSource> {
        &self.cookies
    }

    /// True only when the live call and the data layer are present and the
    /// measurement id is non-empty.
    pub fn is_live_api_available(&self, measurement_id: &str) -> bool {
        self.live_api.is_some() && self.data_layer && !measurement_id.is_empty()
    }

    pub fn cookie_reader(&self, names: CookieNames) -> CookieReader {
        CookieReader::new(self.cookies.clone()).with_names(names)
    }
}

impl std::fmt::Debug for AnalyticsEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsEnvironment")
            .field("live_api", &self.live_api.is_some())
            .field("data_layer", &self.data_layer)
            .finish_non_exhaustive()
    }
}
