//! Domain types: identifiers, transcript entries, actions, errors.

pub mod entry;
pub mod error;
pub mod identifiers;
pub mod key_action;

pub use entry::{ChatEntry, Role};
pub use error::{AppError, InputError, ParseError};
pub use identifiers::{InvalidRequestId, RequestId};
pub use key_action::KeyAction;
