//! Application layer orchestrating decoding, amount resolution and checkout.
//!
//! Services here own boxed port implementations and perform their remote
//! calls one after the other, stopping at the first error.

pub mod checkout;
pub mod decoder;
pub mod resolver;
