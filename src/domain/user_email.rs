use std::fmt;

use derive_more::AsRef;
use serde::{Deserialize, Serialize};
use validator::validate_email;

#[derive(AsRef, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserEmail(String);

impl UserEmail {
    pub fn parse(s: String) -> Result<UserEmail, String> {
        if validate_email(&s) {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid user email.", s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named email recipient, rendered as `Name <email>`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub name: String,
    pub email: UserEmail,
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
