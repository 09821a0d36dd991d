use crate::{CBox, SqliteStatement, error_message_from_ptr, extract::extract_name};
use libsqlite3_sys::{
    SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE, SQLITE_OPEN_URI, sqlite3,
    sqlite3_close, sqlite3_column_count, sqlite3_errmsg, sqlite3_exec, sqlite3_finalize,
    sqlite3_free, sqlite3_open_v2, sqlite3_prepare_v2,
};
use std::{
    ffi::{CStr, CString, c_char, c_void},
    ptr,
    sync::Arc,
};
use strata_core::{Connection, Error, Result, truncate_long};

/// Every statement prepared on the connection keeps the handle alive, so the
/// database is closed once the connection and all its statements are dropped.
pub struct SqliteConnection {
    pub(crate) connection: Arc<CBox<*mut sqlite3>>,
}

impl SqliteConnection {
    pub const PREFIX: &'static str = "sqlite://";

    /// Opens the database at `url`, for example `sqlite://data.sqlite?mode=rwc`.
    ///
    /// What follows the prefix is handed to SQLite as a `file:` URI, so the
    /// query parameters it understands (`mode`, `cache`, ...) apply.
    pub fn connect(url: &str) -> Result<SqliteConnection> {
        let Some(path) = url.strip_prefix(Self::PREFIX) else {
            let error = Error::Connection(format!(
                "Expected sqlite connection url to start with `{}`, found `{}`",
                Self::PREFIX,
                url
            ));
            log::error!("{}", error);
            return Err(error);
        };
        let uri = CString::new(format!("file:{}", path)).map_err(|e| {
            Error::Connection(format!("Error while decoding connection URL `{}`: {}", url, e))
        })?;
        let mut connection = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_close(p);
        });
        let rc = unsafe {
            sqlite3_open_v2(
                uri.as_ptr(),
                &mut *connection,
                SQLITE_OPEN_URI | SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE,
                ptr::null(),
            )
        };
        if rc != SQLITE_OK {
            let message = if connection.is_null() {
                "Could not allocate the connection".to_string()
            } else {
                let message = unsafe { sqlite3_errmsg(*connection) };
                error_message_from_ptr(&message).to_string()
            };
            let error = Error::Connection(format!("Cannot open `{}`: {}", url, message));
            log::error!("{}", error);
            return Err(error);
        }
        log::debug!("Opened sqlite database `{}`", url);
        Ok(Self {
            connection: Arc::new(connection),
        })
    }

    /// Private in-memory database.
    pub fn memory() -> Result<SqliteConnection> {
        Self::connect("sqlite://:memory:")
    }

    fn sql_error(&self, message: impl Into<String>, sql: &str) -> Error {
        let error = Error::Sql {
            message: message.into(),
            query: truncate_long(sql),
        };
        log::error!("{}", error);
        error
    }

    fn last_error(&self, sql: &str) -> Error {
        let message = unsafe { sqlite3_errmsg(**self.connection) };
        self.sql_error(error_message_from_ptr(&message), sql)
    }
}

impl Connection for SqliteConnection {
    type Statement = SqliteStatement;

    fn execute(&mut self, sql: &str) -> Result<()> {
        let query = CString::new(sql)
            .map_err(|_| self.sql_error("The query contains a NUL character", sql))?;
        log::debug!("Executing `{}`", truncate_long(sql));
        let mut error: *mut c_char = ptr::null_mut();
        let rc = unsafe {
            sqlite3_exec(
                **self.connection,
                query.as_ptr(),
                None,
                ptr::null_mut(),
                &mut error,
            )
        };
        if rc != SQLITE_OK {
            let message = error_message_from_ptr(&(error as *const c_char)).to_string();
            if !error.is_null() {
                unsafe { sqlite3_free(error as *mut c_void) };
            }
            return Err(self.sql_error(message, sql));
        }
        Ok(())
    }

    fn prepare(&mut self, sql: &str) -> Result<SqliteStatement> {
        let query = CString::new(sql)
            .map_err(|_| self.sql_error("The query contains a NUL character", sql))?;
        let mut statement = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_finalize(p);
        });
        let mut tail = ptr::null();
        let rc = unsafe {
            sqlite3_prepare_v2(
                **self.connection,
                query.as_ptr(),
                -1,
                &mut *statement,
                &mut tail,
            )
        };
        if rc != SQLITE_OK {
            return Err(self.last_error(sql));
        }
        if statement.is_null() {
            return Err(self.sql_error("The query does not contain any statement", sql));
        }
        if !tail.is_null()
            && !unsafe { CStr::from_ptr(tail) }
                .to_bytes()
                .iter()
                .all(u8::is_ascii_whitespace)
        {
            return Err(self.sql_error("Cannot prepare more than one statement at a time", sql));
        }
        let labels = (0..unsafe { sqlite3_column_count(*statement) })
            .map(|i| extract_name(*statement, i))
            .collect();
        log::debug!("Prepared `{}`", truncate_long(sql));
        Ok(SqliteStatement::new(
            statement,
            self.connection.clone(),
            labels,
        ))
    }
}
