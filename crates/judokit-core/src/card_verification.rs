//! 3-D Secure challenge and result.
//!
//! When the gateway answers a payment with `Requires 3D Secure`, it hands back
//! the issuer's ACS URL together with `md` and `paReq`. These are posted to
//! the ACS inside the embedded web view; once the ACS redirects back, the
//! landing page carries a JSON object with `MD` and `PaRes`, which completes
//! the transaction.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardVerificationModel {
    pub receipt_id: String,
    pub acs_url: String,
    pub md: String,
    pub pa_req: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardVerificationResult {
    #[serde(rename = "MD")]
    pub md: String,
    #[serde(rename = "PaRes")]
    pub pa_res: String,
}

impl CardVerificationResult {
    /// Extract the result from the HTML of the redirect page.
    ///
    /// The page embeds a single JSON object; everything from the first `{` to
    /// the last `}` is parsed.
    pub fn from_html(html: &str) -> Result<Self> {
        let json = extract_json(html).ok_or(Error::MissingVerificationJson)?;
        Ok(serde_json::from_str(json)?)
    }
}

fn extract_json(html: &str) -> Option<&str> {
    let start = html.find('{')?;
    let end = html.rfind('}')?;
    (start < end).then(|| &html[start..=end])
}
