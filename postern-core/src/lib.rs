//! Core functionality for the postern authentication callback component.
//!
//! This crate holds the pieces shared by every layer of the workspace: the
//! error taxonomy, the user profile returned by the identity provider, the
//! signed session token machinery, and the refresh-token repository seam.
//!
//! It is designed to be used as a dependency of the provider client and the
//! HTTP surface, not directly by application code — applications should
//! depend on the `postern` crate instead.
//!
//! See [`UserProfile`] for the provider-asserted identity, [`Session`] for
//! the local authenticated record derived from it, and
//! [`RefreshTokenRepository`] for the keyed refresh-token store.

pub mod error;
pub mod id;
pub mod profile;
pub mod repositories;
pub mod services;
pub mod session;

pub use error::Error;
pub use profile::{SubjectId, UserProfile, VerificationStatus};
pub use repositories::{InMemoryRefreshTokenStore, RefreshTokenRepository};
pub use services::SessionService;
pub use session::{JwtAlgorithm, JwtClaims, JwtConfig, Session, SessionId, SessionToken};
