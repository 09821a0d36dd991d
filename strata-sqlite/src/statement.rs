use crate::{
    CBox, error_message_from_ptr,
    extract::{extract_name, extract_value},
    statement_query,
};
use libsqlite3_sys::*;
use std::{
    ffi::c_int,
    fmt::{self, Display},
    os::raw::{c_char, c_void},
    sync::Arc,
};
use strata_core::{AsValue, Error, Result, Statement, StatementState, Value};

/// Byte length accepted by the bind functions, a negative length would make
/// SQLite read up to the first NUL.
fn bind_length(len: usize, position: usize, query: impl FnOnce() -> String) -> Result<c_int> {
    c_int::try_from(len).map_err(|_| {
        let error = Error::Sql {
            message: format!(
                "Cannot bind parameter {}: {} bytes exceed the maximum length",
                position, len
            ),
            query: query(),
        };
        log::error!("{}", error);
        error
    })
}

/// Prepared statement, owned by the caller that prepared it.
pub struct SqliteStatement {
    // Finalized before the connection reference is released.
    pub(crate) statement: CBox<*mut sqlite3_stmt>,
    _connection: Arc<CBox<*mut sqlite3>>,
    labels: Vec<String>,
    index: usize,
    bound: bool,
    state: StatementState,
}

impl SqliteStatement {
    pub(crate) fn new(
        statement: CBox<*mut sqlite3_stmt>,
        connection: Arc<CBox<*mut sqlite3>>,
        labels: Vec<String>,
    ) -> Self {
        unsafe {
            sqlite3_clear_bindings(*statement);
        }
        Self {
            statement,
            _connection: connection,
            labels,
            index: 1,
            bound: false,
            state: StatementState::Unbound,
        }
    }

    fn state_error(&self, operation: &'static str) -> Error {
        let error = Error::StatementState {
            operation,
            state: self.state,
        };
        log::error!("{}", error);
        error
    }

    fn last_error(&self) -> Error {
        let message = unsafe { sqlite3_errmsg(sqlite3_db_handle(*self.statement)) };
        let error = Error::Sql {
            message: error_message_from_ptr(&message).to_string(),
            query: statement_query(*self.statement),
        };
        log::error!("{}", error);
        error
    }

    /// The projection is compiled again when the schema changes, the labels
    /// follow the statement actually running.
    fn refresh_labels(&mut self) {
        let statement = *self.statement;
        let count = unsafe { sqlite3_column_count(statement) };
        self.labels.clear();
        self.labels.extend((0..count).map(|i| extract_name(statement, i)));
    }

    fn live_column_count(&self) -> usize {
        unsafe { sqlite3_column_count(*self.statement) as usize }
    }

    pub fn query(&self) -> String {
        statement_query(*self.statement)
    }
}

impl Statement for SqliteStatement {
    fn state(&self) -> StatementState {
        self.state
    }

    fn parameter_count(&self) -> usize {
        unsafe { sqlite3_bind_parameter_count(*self.statement) as usize }
    }

    fn bind_index(&mut self, value: Value, position: usize) -> Result<&mut Self> {
        if !self.state.can_bind() {
            return Err(self.state_error("bind"));
        }
        let index = c_int::try_from(position).map_err(|_| Error::Sql {
            message: format!("Parameter index {} is out of range", position),
            query: self.query(),
        })?;
        let statement = *self.statement;
        let rc = match &value {
            Value::Null => unsafe { sqlite3_bind_null(statement, index) },
            Value::Integer(v) => unsafe { sqlite3_bind_int64(statement, index, *v) },
            Value::Real(v) => unsafe { sqlite3_bind_double(statement, index, *v) },
            Value::Text(v) => {
                let len = bind_length(v.len(), position, || self.query())?;
                unsafe {
                    sqlite3_bind_text(
                        statement,
                        index,
                        v.as_ptr() as *const c_char,
                        len,
                        SQLITE_TRANSIENT(),
                    )
                }
            }
            Value::Blob(v) => {
                let len = bind_length(v.len(), position, || self.query())?;
                unsafe {
                    sqlite3_bind_blob(
                        statement,
                        index,
                        v.as_ptr() as *const c_void,
                        len,
                        SQLITE_TRANSIENT(),
                    )
                }
            }
        };
        if rc != SQLITE_OK {
            let message = unsafe { sqlite3_errmsg(sqlite3_db_handle(statement)) };
            let error = Error::Sql {
                message: format!(
                    "Cannot bind parameter {}: {}",
                    position,
                    error_message_from_ptr(&message)
                ),
                query: statement_query(statement),
            };
            log::error!("{}", error);
            return Err(error);
        }
        log::trace!("Bound {:?} at {}", value, position);
        self.index = position + 1;
        self.bound = true;
        self.state = StatementState::Bound;
        Ok(self)
    }

    fn bind<V: AsValue>(&mut self, value: V) -> Result<&mut Self> {
        let index = self.index;
        let value = value
            .as_value()
            .map_err(|e| e.for_field(format!("?{}", index)))?;
        self.bind_index(value, index)
    }

    fn clear_bindings(&mut self) -> Result<&mut Self> {
        if !self.state.can_bind() {
            return Err(self.state_error("clear the bindings of"));
        }
        unsafe {
            sqlite3_clear_bindings(*self.statement);
        }
        self.index = 1;
        self.bound = false;
        self.state = StatementState::Unbound;
        Ok(self)
    }

    fn execute(&mut self) -> Result<u64> {
        if !self.state.can_bind() {
            return Err(self.state_error("execute"));
        }
        while self.step()? {}
        let changes = unsafe { sqlite3_changes(sqlite3_db_handle(*self.statement)) };
        Ok(changes as u64)
    }

    fn step(&mut self) -> Result<bool> {
        if self.state == StatementState::Exhausted {
            return Ok(false);
        }
        loop {
            match unsafe { sqlite3_step(*self.statement) } {
                SQLITE_BUSY => continue,
                SQLITE_ROW => {
                    self.refresh_labels();
                    self.state = StatementState::Executing;
                    return Ok(true);
                }
                SQLITE_DONE => {
                    self.state = StatementState::Exhausted;
                    return Ok(false);
                }
                _ => {
                    self.state = StatementState::Exhausted;
                    return Err(self.last_error());
                }
            }
        }
    }

    fn reset(&mut self) -> Result<&mut Self> {
        // The return code repeats the error of the last step, already reported.
        unsafe {
            sqlite3_reset(*self.statement);
        }
        self.index = 1;
        self.state = if self.bound {
            StatementState::Bound
        } else {
            StatementState::Unbound
        };
        Ok(self)
    }

    fn column_names(&self) -> &[String] {
        &self.labels
    }

    fn column(&self, index: usize) -> Result<Value> {
        if self.state != StatementState::Executing {
            return Err(self.state_error("read a column of"));
        }
        let count = self.live_column_count();
        if index >= count {
            return Err(Error::Sql {
                message: format!(
                    "Column index {} is out of range, the result has {} columns",
                    index, count
                ),
                query: self.query(),
            });
        }
        extract_value(*self.statement, index as c_int)
    }
}

impl Display for SqliteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", *self.statement)
    }
}

#[cfg(test)]
mod tests {
    use super::bind_length;
    use std::ffi::c_int;
    use strata_core::Error;

    #[test]
    fn bind_lengths() {
        assert_eq!(bind_length(0, 1, String::new), Ok(0));
        assert_eq!(
            bind_length(c_int::MAX as usize, 1, String::new),
            Ok(c_int::MAX)
        );
        assert!(matches!(
            bind_length(c_int::MAX as usize + 1, 2, || "SELECT ?, ?".into()),
            Err(Error::Sql { query, .. }) if query == "SELECT ?, ?"
        ));
        assert!(bind_length(usize::MAX, 1, String::new).is_err());
    }
}
