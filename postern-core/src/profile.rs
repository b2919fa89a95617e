//! The identity asserted by the provider's userinfo endpoint.
//!
//! A profile is transient: it exists for the duration of one callback and is
//! consumed into a [`Session`](crate::Session). The core struct is:
//!
//! | Field          | Type                 | Description                                  |
//! | -------------- | -------------------- | -------------------------------------------- |
//! | `subject`      | `SubjectId`          | Stable unique identifier (`sub` claim).      |
//! | `given_name`   | `Option<String>`     | First name, when the scope grants it.        |
//! | `family_name`  | `Option<String>`     | Last name, when the scope grants it.         |
//! | `email`        | `Option<String>`     | Email address, when the scope grants it.     |
//! | `verification` | `VerificationStatus` | Provider-asserted user type and verification.|

use crate::{Error, error::ValidationError};
use serde::{Deserialize, Serialize};

/// A unique, stable identifier for a subject as issued by the provider.
/// This value is opaque; it must never be parsed or synthesized locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(id: &str) -> Self {
        SubjectId(id.to_string())
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SubjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SubjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The nested `verification_status` structure from the userinfo response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationStatus {
    /// The provider's classification of the subject, e.g. `student`.
    pub user_type: Option<String>,

    /// Whether the provider has verified the subject's status.
    pub verified: bool,
}

/// The profile the provider asserts for an authenticated subject.
///
/// Only `subject` is guaranteed; the remaining fields depend on the scopes
/// granted to the client and may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub subject: SubjectId,

    pub given_name: Option<String>,

    pub family_name: Option<String>,

    pub email: Option<String>,

    pub verification: VerificationStatus,
}

impl UserProfile {
    pub fn builder() -> UserProfileBuilder {
        UserProfileBuilder::default()
    }

    /// The provider's `user_type`, when asserted.
    pub fn user_type(&self) -> Option<&str> {
        self.verification.user_type.as_deref()
    }

    pub fn is_verified(&self) -> bool {
        self.verification.verified
    }
}

#[derive(Default)]
pub struct UserProfileBuilder {
    subject: Option<SubjectId>,
    given_name: Option<String>,
    family_name: Option<String>,
    email: Option<String>,
    verification: VerificationStatus,
}

impl UserProfileBuilder {
    pub fn subject(mut self, subject: SubjectId) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn given_name(mut self, given_name: Option<String>) -> Self {
        self.given_name = given_name;
        self
    }

    pub fn family_name(mut self, family_name: Option<String>) -> Self {
        self.family_name = family_name;
        self
    }

    pub fn email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    pub fn verification(mut self, verification: VerificationStatus) -> Self {
        self.verification = verification;
        self
    }

    pub fn build(self) -> Result<UserProfile, Error> {
        Ok(UserProfile {
            subject: self.subject.ok_or(ValidationError::MissingField(
                "Subject is required".to_string(),
            ))?,
            given_name: self.given_name,
            family_name: self.family_name,
            email: self.email,
            verification: self.verification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_builder() {
        let profile = UserProfile::builder()
            .subject(SubjectId::new("u1"))
            .given_name(Some("A".to_string()))
            .family_name(Some("B".to_string()))
            .email(Some("a@b.com".to_string()))
            .verification(VerificationStatus {
                user_type: Some("student".to_string()),
                verified: true,
            })
            .build()
            .unwrap();

        assert_eq!(profile.subject.as_str(), "u1");
        assert_eq!(profile.user_type(), Some("student"));
        assert!(profile.is_verified());
    }

    #[test]
    fn test_profile_builder_requires_subject() {
        let result = UserProfile::builder()
            .email(Some("a@b.com".to_string()))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_sparse_profile() {
        let profile = UserProfile::builder()
            .subject(SubjectId::new("u2"))
            .build()
            .unwrap();

        assert_eq!(profile.user_type(), None);
        assert!(!profile.is_verified());
        assert!(profile.email.is_none());
    }
}
