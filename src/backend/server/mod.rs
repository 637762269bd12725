//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── state.rs  - AppState and its constructors
//! ├── config.rs - Optional services (database, SMTP)
//! └── init.rs   - Server initialization and app creation
//! ```
//!
//! # State Management
//!
//! `AppState` holds the configuration, the token service and trait objects
//! for the stores, object storage, identity verifier and mailer. Handlers
//! receive it through `State<AppState>`.

/// Application state management
pub mod state;

/// Optional service loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::create_app;
pub use state::AppState;
