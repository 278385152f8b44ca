//! Adapters implementing the domain ports.

pub mod emv;
pub mod http;
pub mod in_memory;
