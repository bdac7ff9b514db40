//! Redirect watcher for the 3-D Secure web view.
//!
//! The ACS page is shown until the issuer redirects to the configured
//! redirect URL. That page carries the authorization result as JSON, which
//! is pulled out through the script bridge instead of being displayed.

/// Added to every finished page so ACS pages render at device width.
pub const VIEWPORT_SCRIPT: &str = "javascript:(function() {\
var meta = document.createElement('meta');\
meta.setAttribute('name','viewport');\
meta.setAttribute('content','width=device-width, initial-scale=1.0');\
var head = document.getElementsByTagName('head')[0];\
head.appendChild(meta);\
})()";

/// Script handing the redirect page's HTML to the bridge under `namespace`.
pub fn parse_json_script(namespace: &str) -> String {
    format!("javascript:window.{namespace}.parseJsonFromHtml(document.documentElement.innerHTML);")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandshakeState {
    #[default]
    Loading,
    Redirected,
}

/// What the host web view must do in response to a navigation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeAction {
    /// Reset zoom and load a `javascript:` URL.
    InjectViewport(&'static str),
    /// Load a `javascript:` URL.
    EvaluateScript(String),
    /// An ACS page finished loading and may be displayed.
    PageReady,
    /// The redirect page started loading.
    ResultPageStarted,
    /// Hide the web view.
    Hide,
    PageLoadError {
        code: i32,
        description: String,
        url: String,
    },
}

#[derive(Debug, Clone)]
pub struct Handshake {
    redirect_url: String,
    js_namespace: String,
    state: HandshakeState,
}

impl Handshake {
    pub fn new(redirect_url: impl Into<String>, js_namespace: impl Into<String>) -> Self {
        Handshake {
            redirect_url: redirect_url.into(),
            js_namespace: js_namespace.into(),
            state: HandshakeState::Loading,
        }
    }

    pub fn state(&self) -> HandshakeState {
        self.state
    }

    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    pub fn is_redirect(&self, url: &str) -> bool {
        url == self.redirect_url
    }

    pub fn on_page_started(&mut self, url: &str) -> Vec<HandshakeAction> {
        if !self.is_redirect(url) {
            return Vec::new();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("3DS redirect page started: url='{url}'");

        vec![HandshakeAction::ResultPageStarted, HandshakeAction::Hide]
    }

    pub fn on_page_finished(&mut self, url: &str) -> Vec<HandshakeAction> {
        let mut actions = vec![HandshakeAction::InjectViewport(VIEWPORT_SCRIPT)];

        if self.is_redirect(url) {
            #[cfg(feature = "tracing")]
            tracing::debug!("3DS redirect page finished, extracting result");

            self.state = HandshakeState::Redirected;
            actions.push(HandshakeAction::EvaluateScript(parse_json_script(
                &self.js_namespace,
            )));
        } else {
            actions.push(HandshakeAction::PageReady);
        }

        actions
    }

    /// Errors while loading the redirect page are expected and ignored.
    pub fn on_load_error(
        &self,
        url: &str,
        code: i32,
        description: impl Into<String>,
    ) -> Option<HandshakeAction> {
        if url.starts_with(&self.redirect_url) {
            return None;
        }

        #[cfg(feature = "tracing")]
        tracing::warn!("3DS page failed to load: url='{url}', code={code}");

        Some(HandshakeAction::PageLoadError {
            code,
            description: description.into(),
            url: url.to_string(),
        })
    }
}
