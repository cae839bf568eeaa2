//! Client-side state layer and terminal front end for a rental browsing
//! service: an entity store, an async fetch coordinator, selectors and the
//! screen reconcilers that sit on top of them.

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod gateway;
pub mod logging;
pub mod mvi;
pub mod routing;
pub mod selectors;
pub mod store;
pub mod ui;
