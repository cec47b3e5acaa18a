pub mod error;
pub mod event;
pub mod signature;

pub use error::WebhookError;
pub use event::{EventKind, Network, VerifiedEvent, parse_event};
pub use signature::{SIGNATURE_HEADER, verify_signature};
