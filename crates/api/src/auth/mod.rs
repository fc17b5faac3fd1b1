//! Integration with the external production-tracker identity service.

pub mod identity;
