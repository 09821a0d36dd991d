mod cbox;
mod connection;
mod extract;
mod statement;

use libsqlite3_sys::{sqlite3_sql, sqlite3_stmt};
use std::{
    ffi::{CStr, c_char},
    ptr,
};
use strata_core::truncate_long;

pub(crate) use cbox::*;
pub use connection::*;
pub use statement::*;

pub(crate) fn error_message_from_ptr(ptr: &'_ *const c_char) -> &'_ str {
    unsafe {
        if *ptr != ptr::null() {
            CStr::from_ptr(*ptr)
                .to_str()
                .unwrap_or("Unknown error (the error message was not a valid C string)")
        } else {
            "Unknown error (could not extract the error message)"
        }
    }
}

/// Text of a prepared statement, shortened for error messages.
pub(crate) fn statement_query(statement: *mut sqlite3_stmt) -> String {
    unsafe {
        let query = sqlite3_sql(statement);
        if query.is_null() {
            return String::new();
        }
        truncate_long(&CStr::from_ptr(query).to_string_lossy())
    }
}
