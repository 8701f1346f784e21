// src/scrape/handshake.rs
//
// Two-step session sources: an empty POST hands back a form carrying a
// per-session token, and a second POST with that token returns the log.

use regex::Regex;
use tracing::debug;

use crate::core::Fetcher;
use crate::error::{IngestError, Result};

/// How to find and send the session token.
#[derive(Clone, Copy, Debug)]
pub struct TokenForm {
    /// Pattern with one capture group around the token value.
    pub pattern: &'static str,
    /// Form field the token is posted back in.
    pub field: &'static str,
}

impl TokenForm {
    pub fn extract(&self, body: &str) -> Result<Option<String>> {
        let re = Regex::new(self.pattern)?;
        Ok(re
            .captures(body)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|t| !t.is_empty()))
    }
}

/// Run the handshake and return the second response body.
/// A missing token fails the source.
pub fn fetch_with_token(fetcher: &dyn Fetcher, url: &str, form: TokenForm) -> Result<String> {
    let first = fetcher.post_form(url, &[])?;
    let token = form.extract(&first)?.ok_or_else(|| IngestError::Handshake {
        url: url.to_string(),
        reason: format!("no {} token in first response", form.field),
    })?;
    debug!(url, token_len = token.len(), "session token acquired");

    fetcher.post_form(url, &[(form.field, token.as_str())])
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: TokenForm = TokenForm { pattern: r"name='_UserID' value='([^']+)'", field: "_UserID" };

    #[test]
    fn extracts_token() {
        let body = "<form><input type='hidden' name='_UserID' value='a1b2c3'></form>";
        assert_eq!(FORM.extract(body).unwrap().as_deref(), Some("a1b2c3"));
        assert_eq!(FORM.extract("<form></form>").unwrap(), None);
    }
}
