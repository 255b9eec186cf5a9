//! SMS deep links for sharing the app.
//!
//! Builds `sms:` URIs that open the device's messaging app with a prefilled
//! body. Nothing is sent from here.

use crate::error::{ProcessError, Result};

/// Public URL shared when none is configured.
pub const DEFAULT_APP_URL: &str = "https://app1-pkgk.onrender.com/";

/// The message text that accompanies the link.
pub fn share_message(app_url: &str) -> String {
    format!("Check out this app: {}", app_url)
}

/// Build an `sms:<phone>?body=<message>` link.
///
/// Only digits and `+` are kept from the phone number, so separators such as
/// spaces, dashes and parentheses disappear. The body is percent-encoded.
///
/// # Example
/// ```
/// use pingrank_core::share::sms_link;
///
/// let link = sms_link(" +1 555 0100 ", "hi there").unwrap();
/// assert_eq!(link, "sms:+15550100?body=hi%20there");
/// ```
pub fn sms_link(phone: &str, message: &str) -> Result<String> {
    let digits: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    if !digits.chars().any(|c| c.is_ascii_digit()) {
        return Err(ProcessError::InvalidPhone(phone.trim().to_string()));
    }

    Ok(format!("sms:{}?body={}", digits, urlencoding::encode(message)))
}
