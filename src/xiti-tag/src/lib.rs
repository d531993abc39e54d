//! Fire-and-forget Xiti analytics tagging.
//!
//! Page views and actions are turned into tracking URLs on the caller's
//! thread and handed to a single background worker that delivers them one at
//! a time, in submission order. Delivery failures never reach the caller.
//!
//! ```no_run
//! use xiti_tag::{ActionType, Config, XitiTag};
//!
//! # fn main() -> Result<(), xiti_tag::TagError> {
//! let tag = XitiTag::init(Config::new("logi7", "123456"))?;
//! tag.tag_page("Home", None)?;
//! tag.tag_action("Share", ActionType::Action, Some("12"))?;
//! tag.terminate();
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod delivery;
mod error;
pub mod logging;
pub mod metadata;
pub mod tag;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

pub use client::{global, XitiTag};
pub use config::{Config, ConfigLoader};
pub use error::TagError;
pub use tag::ActionType;
pub use utils::escape::{escape_page_name, sans_accent};
