use crate::{Entity, Error, Result, Schema, SqlType, Statement};
use std::collections::{HashMap, hash_map::Entry};

impl<T: Entity> Schema<T> {
    /// Builds an instance from the row `statement` is positioned at.
    ///
    /// Columns are matched by name against the labels of the query, which may
    /// project any subset of the schema. A column missing from the row is an
    /// error in `strict` mode, otherwise the field keeps the value it has in
    /// `T::make_default()`. Conversion failures are errors in both modes.
    ///
    /// The instance is assembled locally and only returned once every column
    /// is resolved.
    pub fn instantiate<S: Statement + ?Sized>(&self, statement: &S, strict: bool) -> Result<T> {
        let mut result = T::make_default();
        let labels = statement.column_names();
        let mut lookup = HashMap::with_capacity(labels.len());
        for (index, label) in labels.iter().enumerate() {
            match lookup.entry(label.as_str()) {
                Entry::Vacant(entry) => {
                    entry.insert(index);
                }
                Entry::Occupied(..) => {
                    log::warn!(
                        "Column `{}` appears more than once in the row, using the first one",
                        label
                    );
                }
            }
        }
        let fields = T::fields();
        for column in self.columns() {
            let Some(&index) = lookup.get(column.name) else {
                if strict {
                    return Err(Error::MissingColumn {
                        field: column.name.into(),
                    });
                }
                continue;
            };
            let value = statement.column(index)?;
            if value.is_null() && !column.nullable {
                return Err(Error::Coercion {
                    field: column.name.into(),
                    from: SqlType::Null.as_str(),
                    to: fields
                        .get(column.ordinal)
                        .map_or("non nullable value", |v| v.type_name),
                });
            }
            result.set_field_value(column.ordinal, value)?;
        }
        log::trace!("Hydrated a {} row", T::table_name());
        Ok(result)
    }

    pub fn instantiate_loose<S: Statement + ?Sized>(&self, statement: &S) -> Result<T> {
        self.instantiate(statement, false)
    }

    pub fn instantiate_strict<S: Statement + ?Sized>(&self, statement: &S) -> Result<T> {
        self.instantiate(statement, true)
    }
}
