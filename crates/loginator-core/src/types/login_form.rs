//! Login form type.

use crate::Credentials;

/// Form field carrying the username on submission.
pub const USERNAME_FIELD: &str = "username";

/// Form field carrying the password on submission.
pub const PASSWORD_FIELD: &str = "password";

/// The portal's login form: where it posts and which hidden fields it carries.
///
/// Fields keep first-seen order; a later field with the same name replaces
/// the earlier value in place. The form is never mutated after
/// construction; credentials are merged into a copy by
/// [`LoginForm::submission_fields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    action: String,
    fields: Vec<(String, String)>,
}

impl LoginForm {
    /// Build a form from its action and hidden fields.
    pub fn new<I, K, V>(action: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut merged = Vec::new();
        for (name, value) in fields {
            upsert(&mut merged, name.into(), value.into());
        }
        Self {
            action: action.into(),
            fields: merged,
        }
    }

    /// Returns the form action, possibly relative to the page it came from.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the hidden fields in document order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Returns the value of a hidden field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the fields to POST: the hidden fields plus `username` and
    /// `password`, which override any hidden field of the same name.
    pub fn submission_fields(&self, credentials: &Credentials) -> Vec<(String, String)> {
        let mut fields = self.fields.clone();
        upsert(
            &mut fields,
            USERNAME_FIELD.to_string(),
            credentials.username().to_string(),
        );
        upsert(
            &mut fields,
            PASSWORD_FIELD.to_string(),
            credentials.password().to_string(),
        );
        fields
    }
}

fn upsert(fields: &mut Vec<(String, String)>, name: String, value: String) {
    match fields.iter_mut().find(|(k, _)| *k == name) {
        Some(slot) => slot.1 = value,
        None => fields.push((name, value)),
    }
}
