//! Derive an [`Entity`] and get back its [`Schema`]: the table it maps to,
//! the SQL to create, fill and read that table, and typed instances from the
//! rows of any query.
//!
//! ```rust,ignore
//! use strata::{Connection, Entity, Schema};
//!
//! #[derive(Entity, Default)]
//! #[strata(default)]
//! struct Topic {
//!     #[strata(primary_key)]
//!     id: i64,
//!     name: String,
//! }
//!
//! let schema = Topic::schema()?;
//! schema.create_table(&mut connection, "topic", true)?;
//! schema.insert_one(&mut connection, "topic", &Topic { id: 1, name: "Ownership".into() })?;
//! let topics = schema.select_all(&mut connection, "topic", true)?;
//! ```
pub use strata_core::*;
pub use strata_macros::*;
