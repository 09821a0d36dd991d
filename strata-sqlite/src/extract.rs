use crate::statement_query;
use libsqlite3_sys::*;
use std::{
    ffi::{CStr, c_int},
    slice,
};
use strata_core::{Error, Result, Value};

unsafe fn column_bytes<'a>(ptr: *const u8, statement: *mut sqlite3_stmt, index: c_int) -> &'a [u8] {
    unsafe {
        let len = sqlite3_column_bytes(statement, index) as usize;
        // Zero length blobs come back as a null pointer.
        if ptr.is_null() || len == 0 {
            &[]
        } else {
            slice::from_raw_parts(ptr, len)
        }
    }
}

pub(crate) fn extract_value(statement: *mut sqlite3_stmt, index: c_int) -> Result<Value> {
    unsafe {
        let column_type = sqlite3_column_type(statement, index);
        Ok(match column_type {
            SQLITE_NULL => Value::Null,
            SQLITE_INTEGER => Value::Integer(sqlite3_column_int64(statement, index)),
            SQLITE_FLOAT => Value::Real(sqlite3_column_double(statement, index)),
            SQLITE_BLOB => {
                let ptr = sqlite3_column_blob(statement, index) as *const u8;
                Value::Blob(column_bytes(ptr, statement, index).to_vec())
            }
            SQLITE_TEXT => {
                let ptr = sqlite3_column_text(statement, index);
                let text = String::from_utf8(column_bytes(ptr, statement, index).to_vec())
                    .map_err(|e| Error::Sql {
                        message: format!("Column {} is not valid UTF-8: {}", index, e),
                        query: statement_query(statement),
                    })?;
                Value::Text(text)
            }
            _ => {
                return Err(Error::Sql {
                    message: format!("Unexpected column type {}", column_type),
                    query: statement_query(statement),
                });
            }
        })
    }
}

pub(crate) fn extract_name(statement: *mut sqlite3_stmt, index: c_int) -> String {
    unsafe {
        let name = sqlite3_column_name(statement, index);
        if name.is_null() {
            return String::new();
        }
        CStr::from_ptr(name).to_string_lossy().into_owned()
    }
}
