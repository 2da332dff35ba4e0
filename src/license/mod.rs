//! License file detection and fuzzy matching.
//!
//! - [`words`] — reduces license text to a set of lowercase words, dropping copyright lines.
//! - [`template`] — parses the embedded catalog of canonical license texts.
//! - [`locator`] — finds the most likely license file for a package.
//! - [`matcher`] — scores a license file against every template (Dice coefficient).
//! - [`grouping`] — collapses packages sharing one license file under their common prefix.

pub mod grouping;
pub mod locator;
pub mod matcher;
pub mod template;
pub mod words;
