//! Services encapsulating the operations on core types.

pub mod session;

pub use session::SessionService;
