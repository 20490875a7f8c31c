//! Sign-in orchestration.

mod login;

pub use login::{LoginError, LoginService};
