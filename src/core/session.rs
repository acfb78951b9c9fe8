use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::infrastructure::browser::BrowserCookie;

/// Authenticated session: the cookie jar captured after a completed login
/// challenge, serialized as an opaque JSON array of cookie records.
///
/// A session is only meaningful for the site origin it was captured from and
/// must be re-injected into the browser context before each authenticated
/// workflow step. The client never mutates it; if the site renews cookies,
/// the live browser context tracks that on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionData {
    cookies: Vec<CookieRecord>,
}

/// One stored cookie. Field names follow the driver protocol shape so the
/// serialized blob stays interchangeable with what the browser reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
}

impl SessionData {
    /// Deserializes a session previously produced by [`SessionData::to_json`]
    /// (or by the login workflow of another process).
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serializes the session for external storage. Round-trips losslessly
    /// through [`SessionData::from_json`].
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub(crate) fn from_browser_cookies(cookies: Vec<BrowserCookie>) -> Self {
        Self {
            cookies: cookies
                .into_iter()
                .map(|c| CookieRecord {
                    name: c.name,
                    value: c.value,
                    domain: c.domain,
                    path: c.path,
                    expires: c.expires,
                    http_only: c.http_only,
                    secure: c.secure,
                    same_site: c.same_site,
                })
                .collect(),
        }
    }

    /// Cookie records scoped to the given origin, ready for injection.
    /// Records that carry no domain are pinned to `url` the way the site's
    /// own login flow scopes them.
    pub(crate) fn to_browser_cookies(&self, url: &str) -> Vec<BrowserCookie> {
        self.cookies
            .iter()
            .map(|c| BrowserCookie {
                name: c.name.clone(),
                value: c.value.clone(),
                url: c.domain.is_none().then(|| url.to_string()),
                domain: c.domain.clone(),
                path: c.path.clone(),
                expires: c.expires,
                http_only: c.http_only,
                secure: c.secure,
                same_site: c.same_site.clone(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }
}
