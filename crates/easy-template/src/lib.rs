//! # easy-template
//!
//! Pure generation of minimal service bundles.
//!
//! Handles:
//! - **Kinds**: Canned descriptors for well-known services, used as the
//!   last-resort acquisition fallback.
//! - **Starter**: Templates for bundles the user creates from scratch.
//! - **Content**: The descriptor/readme pair handed back to the caller.
//!
//! Nothing here touches the filesystem; callers write the returned content.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod content;
pub mod kinds;
pub mod starter;

pub use content::BundleContent;
pub use kinds::{KnownKind, synthesize};
pub use starter::{DbFlavor, InitTemplate};
