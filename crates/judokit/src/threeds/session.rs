use judokit_core::{
    card_verification::{CardVerificationModel, CardVerificationResult},
    result::JudoPaymentResult,
};
use url::{Url, form_urlencoded};

use super::handshake::{Handshake, HandshakeAction};

/// The embedded web renderer hosting the ACS pages.
pub trait WebViewHost {
    /// Navigate to `url` with a form-encoded POST body.
    fn post_url(&mut self, url: &Url, body: &[u8]);

    /// Load a `javascript:` URL into the current page.
    fn load_url(&mut self, url: &str);

    fn set_initial_scale(&mut self, _scale: u32) {}

    fn set_visible(&mut self, visible: bool);
}

/// Events surfaced to the payment flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The redirect page started loading; show a progress indicator.
    PageStarted,
    /// An ACS page finished loading; show the web view.
    PageLoaded,
    AuthorizationComplete {
        receipt_id: String,
        result: CardVerificationResult,
    },
    PageLoadError {
        code: i32,
        description: String,
        url: String,
    },
}

impl SessionEvent {
    pub fn into_error(self) -> Option<CardVerificationError> {
        match self {
            SessionEvent::PageLoadError {
                code,
                description,
                url,
            } => Some(CardVerificationError::PageLoad {
                code,
                description,
                url,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CardVerificationError {
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Unreadable card verification result: {0}")]
    Result(#[from] judokit_core::errors::Error),

    #[error("Card verification page failed to load: {description} ({code}) at '{url}'")]
    PageLoad {
        code: i32,
        description: String,
        url: String,
    },
}

/// A single 3-D Secure challenge shown in a [`WebViewHost`].
pub struct CardVerificationSession<H: WebViewHost> {
    host: H,
    handshake: Handshake,
    model: CardVerificationModel,
}

impl<H: WebViewHost> CardVerificationSession<H> {
    pub fn new(
        host: H,
        model: CardVerificationModel,
        redirect_url: impl Into<String>,
        js_namespace: impl Into<String>,
    ) -> Self {
        CardVerificationSession {
            host,
            handshake: Handshake::new(redirect_url, js_namespace),
            model,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn handshake(&self) -> &Handshake {
        &self.handshake
    }

    pub fn receipt_id(&self) -> &str {
        &self.model.receipt_id
    }

    /// Post the challenge form to the ACS.
    pub fn authorize(&mut self) -> Result<(), CardVerificationError> {
        let acs_url = Url::parse(&self.model.acs_url)?;
        let body = authorization_form(&self.model, self.handshake.redirect_url());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Posting 3DS challenge: receipt='{}', acs='{}'",
            self.model.receipt_id,
            acs_url
        );

        self.host.post_url(&acs_url, body.as_bytes());
        Ok(())
    }

    pub fn on_page_started(&mut self, url: &str) -> Option<SessionEvent> {
        let actions = self.handshake.on_page_started(url);
        self.apply(actions)
    }

    pub fn on_page_finished(&mut self, url: &str) -> Option<SessionEvent> {
        let actions = self.handshake.on_page_finished(url);
        self.apply(actions)
    }

    pub fn on_received_error(
        &mut self,
        url: &str,
        code: i32,
        description: &str,
    ) -> Option<SessionEvent> {
        let action = self.handshake.on_load_error(url, code, description);
        self.apply(action.into_iter().collect())
    }

    /// Entry point of the script bridge.
    ///
    /// Malformed pages are reported, never retried.
    pub fn parse_json_from_html(
        &self,
        html: &str,
    ) -> Result<SessionEvent, CardVerificationError> {
        let result = CardVerificationResult::from_html(html)?;
        Ok(SessionEvent::AuthorizationComplete {
            receipt_id: self.model.receipt_id.clone(),
            result,
        })
    }

    /// Back navigation ends the challenge.
    pub fn cancel(self) -> JudoPaymentResult {
        #[cfg(feature = "tracing")]
        tracing::debug!("3DS challenge cancelled: receipt='{}'", self.model.receipt_id);

        JudoPaymentResult::user_cancelled()
    }

    fn apply(&mut self, actions: Vec<HandshakeAction>) -> Option<SessionEvent> {
        let mut event = None;
        for action in actions {
            match action {
                HandshakeAction::InjectViewport(script) => {
                    self.host.set_initial_scale(1);
                    self.host.load_url(script);
                }
                HandshakeAction::EvaluateScript(script) => self.host.load_url(&script),
                HandshakeAction::Hide => self.host.set_visible(false),
                HandshakeAction::PageReady => {
                    self.host.set_visible(true);
                    event = Some(SessionEvent::PageLoaded);
                }
                HandshakeAction::ResultPageStarted => event = Some(SessionEvent::PageStarted),
                HandshakeAction::PageLoadError {
                    code,
                    description,
                    url,
                } => {
                    event = Some(SessionEvent::PageLoadError {
                        code,
                        description,
                        url,
                    })
                }
            }
        }
        event
    }
}

/// `MD`, `TermUrl` and `PaReq`, form-encoded as UTF-8.
pub fn authorization_form(model: &CardVerificationModel, term_url: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("MD", &model.md)
        .append_pair("TermUrl", term_url)
        .append_pair("PaReq", &model.pa_req)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> CardVerificationModel {
        CardVerificationModel {
            receipt_id: "123456".into(),
            acs_url: "https://acs.example/challenge".into(),
            md: "md value".into(),
            pa_req: "pa+req/=".into(),
        }
    }

    #[test]
    fn test_authorization_form() {
        assert_eq!(
            authorization_form(&model(), "https://pay.judopay.com/Android/Parse3DS"),
            "MD=md+value&TermUrl=https%3A%2F%2Fpay.judopay.com%2FAndroid%2FParse3DS&PaReq=pa%2Breq%2F%3D"
        );
    }
}
