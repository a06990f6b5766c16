//! Group model, address column codec and address validation.

mod codec;
mod model;
pub mod validation;

pub use codec::{decode_addresses, encode_addresses};
pub use model::{Group, GroupId};
