//! Pure decoding logic and the ports to the outside world.

pub mod amount;
pub mod boleto;
pub mod checkout;
pub mod claims;
pub mod mpm;
pub mod payment;
pub mod ports;
pub mod tlv;
