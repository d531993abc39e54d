pub mod global;
mod xiti_tag;

pub use global::TagRegistry;
pub use xiti_tag::XitiTag;
