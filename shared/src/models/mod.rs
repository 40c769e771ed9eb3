//! Domain models for Boom Art Sales

mod report;
mod sale;
mod user;

pub use report::*;
pub use sale::*;
pub use user::*;
