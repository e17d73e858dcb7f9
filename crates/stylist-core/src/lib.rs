#![allow(clippy::must_use_candidate)]

mod context;
mod error;

pub use context::{Authentication, RequestContext, SessionClaims, SessionToken};
pub use error::HttpError;
