//! Glide Links
//!
//! Finds the anchors in a markup subtree that qualify for interception
//! and decides what to do with a click on them. Links that do not
//! qualify — cross-origin, fragment jumps, binary media, modifier
//! clicks — are left to native browser navigation.

mod click;
mod eligibility;
mod error;
mod scanner;

pub use click::{disposition, Click, ClickDisposition, MouseButton};
pub use eligibility::{eligibility, SkipReason};
pub use error::LinkError;
pub use scanner::{scan, CandidateLink, ScanSettings, CONTAINER_ATTR, TITLE_ATTR};

pub type Result<T> = std::result::Result<T, LinkError>;
