//! Finds external anchors in HTML fragments and splices markup in front of them.
//!
//! This is *not* an HTML parser. Anchors are found with a single
//! case-insensitive regular expression, which keeps the scan tolerant of
//! broken markup: anything that doesn't look like a complete
//! `<a href="http...">...</a>` is passed over without complaint.

mod anchor;
mod consts;
mod rewrite;

pub use crate::anchor::{AnchorMatch, Anchors, anchors};
pub use crate::rewrite::{image_tag, rewrite};
