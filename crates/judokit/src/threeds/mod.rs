//! 3-D Secure authorization inside an embedded web view.
//!
//! [`CardVerificationSession::authorize`] posts the challenge to the ACS.
//! The host then forwards navigation events and the script bridge callback
//! to the session, which answers with [`SessionEvent`]s. An
//! [`SessionEvent::AuthorizationComplete`] carries the result the gateway
//! needs to finish the transaction.

pub mod handshake;
pub mod session;

pub use handshake::{Handshake, HandshakeAction, HandshakeState};
pub use session::{CardVerificationError, CardVerificationSession, SessionEvent, WebViewHost};
