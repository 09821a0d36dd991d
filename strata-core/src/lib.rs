mod as_value;
mod bind;
mod connection;
mod decode_type;
mod entity;
mod error;
mod hydrate;
mod schema;
mod sql_writer;
mod statement;
mod util;
mod value;

pub use as_value::*;
pub use connection::*;
pub use decode_type::*;
pub use entity::*;
pub use error::*;
pub use schema::*;
pub use sql_writer::*;
pub use statement::*;
pub use util::*;
pub use value::*;
