mod clock;
mod payload;
mod url_builder;

pub use clock::{Clock, SystemClock};
pub use payload::{ActionType, EventPayload};
pub use url_builder::UrlBuilder;
