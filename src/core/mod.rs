//! # Core Dashboard Logic
//!
//! This module contains the dashboard's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Dashboard (state)    │
//!                    │  • handlers (events)    │
//!                    │  • update() (actions)   │
//!                    │                         │
//!                    │  No UI. Channel-generic │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  Channel   │
//!     │  Adapter   │                          │ (WebSocket)│
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Dashboard` struct, all rendered state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`handlers`] / [`dispatch`]: inbound event handlers and their registry
//! - [`view_model`]: ties state, handlers and a channel together
//! - [`classify`] / [`status`]: message classification and status parsing
//! - [`stream`], [`transcript`], [`logs`]: the state's building blocks
//! - [`poller`]: the fixed-period status timer
//! - [`config`]: config file, env and CLI resolution

pub mod action;
pub mod classify;
pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod logs;
pub mod poller;
pub mod state;
pub mod status;
pub mod stream;
pub mod transcript;
pub mod view_model;

pub use action::{Action, Effect};
pub use state::Dashboard;
pub use view_model::ViewModel;
