use crate::{AsValue, Entity, Result, Schema, Value};

/// Lifecycle of a prepared statement.
///
/// ```text
/// Unbound --bind--> Bound --step--> Executing --step (done)--> Exhausted
///    ^                ^                 |                          |
///    |                +------reset------+--------------------------+
///    +--clear_bindings (from Bound)
/// ```
/// `reset` returns to `Bound` when parameters are still bound, to `Unbound`
/// otherwise. Binding is only possible in `Unbound` and `Bound`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementState {
    #[default]
    Unbound,
    Bound,
    Executing,
    Exhausted,
}

impl StatementState {
    pub fn can_bind(&self) -> bool {
        matches!(self, StatementState::Unbound | StatementState::Bound)
    }
}

/// A prepared, parameterized statement: the collaborator the binder and the
/// hydrator work against.
///
/// Parameter positions start from 1. Methods that only mutate state return
/// `&mut Self` for fluent chaining:
/// ```rust,ignore
/// insert.reset()?.bind_entity(&schema, &topic)?.execute()?;
/// ```
/// A statement belongs to a single thread at a time, callers serialize
/// access to it.
pub trait Statement {
    fn state(&self) -> StatementState;

    /// Number of positional parameters.
    fn parameter_count(&self) -> usize;

    /// Bind a value at a specific position.
    fn bind_index(&mut self, value: Value, position: usize) -> Result<&mut Self>;

    /// Bind a value at the position following the last one bound.
    fn bind<V: AsValue>(&mut self, value: V) -> Result<&mut Self>;

    fn clear_bindings(&mut self) -> Result<&mut Self>;

    /// Run to completion, returns the number of rows changed.
    fn execute(&mut self) -> Result<u64>;

    /// Advance to the next row, `false` once the result is exhausted.
    fn step(&mut self) -> Result<bool>;

    fn reset(&mut self) -> Result<&mut Self>;

    /// Labels of the result columns, as projected by the query.
    fn column_names(&self) -> &[String];

    /// Value of the column at `index` (from 0) in the current row.
    fn column(&self, index: usize) -> Result<Value>;

    fn column_by_name(&self, name: &str) -> Result<Option<Value>> {
        match self.column_names().iter().position(|v| v == name) {
            Some(index) => self.column(index).map(Some),
            None => Ok(None),
        }
    }

    /// Bind every field of `entity` in schema order.
    fn bind_entity<T: Entity>(&mut self, schema: &Schema<T>, entity: &T) -> Result<&mut Self>
    where
        Self: Sized,
    {
        schema.bind(self, entity)
    }
}
