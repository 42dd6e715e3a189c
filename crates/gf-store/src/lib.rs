//! GuardFlow Entity Store
//!
//! Generic keyed-record storage backing every entity kind.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          ENTITY STORE                                   │
//! │                                                                         │
//! │  ┌───────────────┐  ┌───────────────┐  ┌───────────────┐               │
//! │  │ EntityStore   │  │ EntityStore   │  │ EntityStore   │   typed views │
//! │  │   <User>      │  │   <Tenant>    │  │   <Session>   │   per kind    │
//! │  └───────┬───────┘  └───────┬───────┘  └───────┬───────┘               │
//! │          │                  │                  │                        │
//! │  ┌───────▼──────────────────▼──────────────────▼────────────────────┐  │
//! │  │                        Backend (trait)                           │  │
//! │  │   read | insert | update | remove | ids                          │  │
//! │  │   record write + index update = one atomic step                  │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │                                      │
//! │  ┌──────────────────────────────▼───────────────────────────────────┐  │
//! │  │  MemoryBackend: kind → { records, insertion-ordered index }      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records cross the backend seam as JSON values, so a durable backend can be
//! slotted in without touching the typed layer.

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod backend;
pub mod entity;
pub mod error;
pub mod store;

pub use backend::{Backend, MemoryBackend, RawRecord};
pub use entity::Entity;
pub use error::{StoreError, StoreResult};
pub use store::{EntityStore, Page};
