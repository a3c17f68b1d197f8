//! Utility modules: string classifiers, key cleaning, developer trace.
pub mod devlog;
pub mod strings;
pub mod validate;
