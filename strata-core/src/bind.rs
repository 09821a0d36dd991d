use crate::{Entity, Error, Result, Schema, Statement};

impl<T: Entity> Schema<T> {
    /// Binds every field of `entity` at `ordinal + 1`.
    ///
    /// All values are read and checked before the first one is bound, so a
    /// `ConstraintViolation` or a failed conversion leaves the statement as
    /// it was. The statement is not executed.
    pub fn bind<'s, S: Statement>(&self, statement: &'s mut S, entity: &T) -> Result<&'s mut S> {
        let values = self
            .columns()
            .iter()
            .map(|column| {
                let value = entity.field_value(column.ordinal)?;
                if value.is_null() && !column.nullable {
                    return Err(Error::ConstraintViolation {
                        field: column.name.into(),
                    });
                }
                Ok(value)
            })
            .collect::<Result<Vec<_>>>()?;
        for (column, value) in self.columns().iter().zip(values) {
            log::trace!("Binding {} = {:?}", column.name, value);
            statement.bind_index(value, column.ordinal + 1)?;
        }
        Ok(statement)
    }
}
