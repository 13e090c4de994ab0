//! Session models and snapshot persistence for the storefront.

pub mod session;

pub use session::CurrentUser;
