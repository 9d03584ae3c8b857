//! Domain types for the style configuration.
//!
//! Pure value types with no file system access: the validated
//! [`StyleConfig`](style_config::StyleConfig) record and the token types it is
//! made of.  Parsing documents and checking paths happens in the outer
//! `loader` and `content` modules.

pub mod color;
pub mod font;
pub mod style_config;
