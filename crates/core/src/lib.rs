//! Promotional popup orchestration and theming engine.
//!
//! Decides whether a popup set is shown to a visitor on a given page, which
//! slides survive filtering, how the layered theme configuration collapses
//! into a single renderable descriptor, and how multi-slide navigation is
//! driven. Everything here is synchronous and free of I/O; timers are modelled
//! as explicit state driven by a caller-supplied millisecond clock.

#[macro_use]
mod macros;

pub mod carousel;
pub mod dispatch;
pub mod eligibility;
pub mod error;
pub mod popup;
pub mod safety;
pub mod theme;
pub mod theme_catalog;
pub mod timer;
pub mod types;
