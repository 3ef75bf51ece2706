//! # Core Application Logic
//!
//! The chat's business logic. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │  Backend   │
//!            │  Adapter   │            │  (reqwest) │
//!            │ (ratatui)  │            │            │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, the display sequence and pending slot
//! - [`action`]: The `Action` enum and `update()`
//! - [`message`]: `Message` and `Category`
//! - [`markup`]: inline bold/italic parsing
//! - [`config`]: config file and override resolution

pub mod action;
pub mod config;
pub mod markup;
pub mod message;
pub mod state;
