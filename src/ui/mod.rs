//! Terminal front end: screens, input and the event loop.

pub mod app;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod layout;
pub mod login;
pub mod render;
pub mod review_form;
pub mod runtime;
pub mod screens;
pub mod terminal_guard;
pub mod theme;

pub use runtime::run;
