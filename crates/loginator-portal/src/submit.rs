//! Credential submission.

use tracing::{error, info, instrument};

use loginator_core::types::PortalUrl;
use loginator_core::{Credentials, Error, LoginForm, Result};

use crate::client::PortalClient;

/// Text the portal puts in its response when it rejects credentials.
pub const AUTH_FAILED_MARKER: &str = "Authentication Failed";

/// POST the form with credentials merged in and return the response body.
///
/// `page_url` is the final URL of the login page; relative form actions are
/// resolved against it.
#[instrument(skip(client, form, credentials), fields(page_url = %page_url, username = credentials.username()))]
pub(crate) async fn submit(
    client: &PortalClient,
    page_url: &PortalUrl,
    form: &LoginForm,
    credentials: &Credentials,
) -> Result<String> {
    let target = page_url.resolve(form.action())?;
    let fields = form.submission_fields(credentials);

    let response = client.post_form(&target, &fields).await?;

    if response.body.contains(AUTH_FAILED_MARKER) {
        error!("Portal rejected credentials");
        return Err(Error::Authentication {
            username: credentials.username().to_string(),
        });
    }

    info!(%target, "Submitted login form");
    Ok(response.body)
}
