//! HTML bodies for the platform's notification emails.
//!
//! Templates are plain format strings. Subjects live next to the bodies so a
//! caller grabs both from one place.

/// Subject and HTML body pair.
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

/// Sent when an admin approves an access request and creates the account.
pub fn access_request_approved(
    full_name: &str,
    email: &str,
    temp_password: &str,
    login_url: &str,
) -> EmailContent {
    EmailContent {
        subject: "Your Single Audio account is ready".to_string(),
        html: format!(
            "<h2>Welcome to Single Audio, {full_name}!</h2>\
             <p>Your access request has been approved. An account has been created for you:</p>\
             <ul>\
               <li>Email: <strong>{email}</strong></li>\
               <li>Temporary password: <strong>{temp_password}</strong></li>\
             </ul>\
             <p>Sign in at <a href=\"{login_url}\">{login_url}</a> and change your password \
             from your profile settings.</p>"
        ),
    }
}

/// Sent when an admin rejects an access request.
pub fn access_request_rejected(full_name: &str, reason: Option<&str>) -> EmailContent {
    let reason_html = match reason {
        Some(reason) => format!("<p>Reason: {reason}</p>"),
        None => String::new(),
    };
    EmailContent {
        subject: "Your Single Audio access request".to_string(),
        html: format!(
            "<h2>Hello {full_name},</h2>\
             <p>Unfortunately your request for access to Single Audio was not approved \
             at this time.</p>\
             {reason_html}\
             <p>You are welcome to apply again in the future.</p>"
        ),
    }
}

/// Sent when an admin approves a payout request.
pub fn payout_approved(amount: f64, currency: &str, method: &str) -> EmailContent {
    EmailContent {
        subject: "Your payout has been approved".to_string(),
        html: format!(
            "<h2>Payout approved</h2>\
             <p>Your payout request of <strong>{amount:.2} {currency}</strong> via {method} \
             has been approved and will be processed shortly.</p>"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_email_includes_credentials_and_login_url() {
        let content = access_request_approved(
            "Ada Artist",
            "ada@example.com",
            "s3cret-temp",
            "https://app.singleaudio.example/login",
        );
        assert!(content.html.contains("ada@example.com"));
        assert!(content.html.contains("s3cret-temp"));
        assert!(content.html.contains("https://app.singleaudio.example/login"));
    }

    #[test]
    fn rejection_email_omits_reason_when_absent() {
        let content = access_request_rejected("Ada Artist", None);
        assert!(!content.html.contains("Reason:"));

        let with_reason = access_request_rejected("Ada Artist", Some("incomplete details"));
        assert!(with_reason.html.contains("incomplete details"));
    }

    #[test]
    fn payout_email_formats_amount_to_cents() {
        let content = payout_approved(125.5, "USD", "paypal");
        assert!(content.html.contains("125.50 USD"));
    }
}
