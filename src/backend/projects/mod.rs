//! Staging Projects Module
//!
//! HTTP surface of the staging document graph. Handlers here authenticate the
//! caller, load one project, hand it to the synchronous operations in
//! [`crate::staging`], and save the whole document back.
//!
//! # Module Structure
//!
//! ```text
//! projects/
//! ├── mod.rs
//! └── handlers/
//!     ├── mod.rs      - load/save helpers shared by every handler
//!     ├── types.rs    - JSON request and response bodies
//!     ├── projects.rs - create, update, delete, owner reads
//!     ├── areas.rs    - areas, info markers, hotspots, pair deletion
//!     ├── items.rs    - item library and placements
//!     ├── admin.rs    - admin reads and deletes
//!     └── public.rs   - anonymous reads
//! ```
//!
//! # Request Lifecycle
//!
//! 1. Validate the request body
//! 2. Load the project scoped to the caller (404 when absent or not owned)
//! 3. Store any uploaded image
//! 4. Apply one graph operation
//! 5. Save the document (last writer wins)

pub mod handlers;
