//! Send affordances for a drafted email. Components are percent-encoded (RFC 3986,
//! spaces as `%20`) so mail clients show the text exactly as drafted.

const GMAIL_COMPOSE_URL: &str = "https://mail.google.com/mail/?view=cm&fs=1";

/// Returns a `mailto:` URL for the draft. `to` may be absent (recipient chosen in the client).
pub fn mailto_url(to: Option<&str>, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        urlencoding::encode(to.unwrap_or_default()),
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}

/// Returns a Gmail web compose URL prefilled with the draft.
pub fn gmail_compose_url(to: Option<&str>, subject: &str, body: &str) -> String {
    format!(
        "{GMAIL_COMPOSE_URL}&to={}&su={}&body={}",
        urlencoding::encode(to.unwrap_or_default()),
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}
