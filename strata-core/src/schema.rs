use crate::{Entity, Error, GenericSqlWriter, Result, Sql, SqlType, SqlWriter, map_type};
use std::{
    any,
    collections::HashSet,
    fmt::{self, Debug},
    marker::PhantomData,
};

/// One column of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub nullable: bool,
    pub primary_key: bool,
    /// Position in the schema, also the field index in the entity.
    pub ordinal: usize,
}

/// Immutable, ordered column model of an [`Entity`].
///
/// The column order is fixed when the schema is built and is the only order
/// used to render statements, bind parameters and hydrate rows. Building is
/// cheap and performs no I/O, callers that need the same schema often keep
/// it around themselves.
pub struct Schema<T> {
    columns: Box<[Column]>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Schema<T> {
    /// Reflects `T::make_default()` into a schema.
    pub fn build() -> Result<Self> {
        let template = T::make_default();
        let mut names = HashSet::new();
        let mut columns = Vec::with_capacity(T::fields().len());
        for (ordinal, (def, value)) in template.reflect().enumerate() {
            let Some((sql_type, nullable)) = map_type(&def.declared) else {
                let error = Error::UnsupportedType {
                    field: def.field.into(),
                    type_name: def.type_name.into(),
                };
                log::debug!("Cannot build the schema of {}: {}", any::type_name::<T>(), error);
                return Err(error);
            };
            check_identifier(def.name)?;
            if !names.insert(def.name) {
                return Err(Error::DuplicateColumn(def.name.into()));
            }
            log::trace!("{}.{} defaults to {:?}", T::table_name(), def.name, value);
            columns.push(Column {
                name: def.name,
                sql_type,
                nullable: nullable && !def.not_null && !def.primary_key,
                primary_key: def.primary_key,
                ordinal,
            });
        }
        log::debug!(
            "Built the schema of {} with {} columns",
            any::type_name::<T>(),
            columns.len()
        );
        Ok(Self {
            columns: columns.into_boxed_slice(),
            _entity: PhantomData,
        })
    }
}

impl<T> Schema<T> {
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Renders `sql` with the default writer.
    ///
    /// ```rust,ignore
    /// let schema = Schema::<Topic>::build()?;
    /// assert_eq!(
    ///     schema.sql(Sql::Select("topic"))?,
    ///     r#"SELECT "id", "name" FROM "topic""#,
    /// );
    /// ```
    pub fn sql(&self, sql: Sql<'_>) -> Result<String> {
        self.sql_with(&GenericSqlWriter::new(), sql)
    }

    /// Renders `sql` with a specific dialect.
    pub fn sql_with(&self, writer: &impl SqlWriter, sql: Sql<'_>) -> Result<String> {
        check_identifier(sql.table())?;
        let mut out = String::with_capacity(32 + self.columns.len() * 24);
        match sql {
            Sql::Create(table) => writer.write_create_table(&mut out, &self.columns, table, false),
            Sql::CreateIfNotExists(table) => {
                writer.write_create_table(&mut out, &self.columns, table, true)
            }
            Sql::Insert(table) => writer.write_insert(&mut out, &self.columns, table),
            Sql::Select(table) => writer.write_select(&mut out, &self.columns, table),
            Sql::Drop(table) => writer.write_drop_table(&mut out, table, false),
            Sql::DropIfExists(table) => writer.write_drop_table(&mut out, table, true),
        }
        Ok(out)
    }
}

/// Identifiers are quoted when rendered, only names that cannot be quoted
/// are rejected.
pub(crate) fn check_identifier(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('\0') {
        return Err(Error::InvalidIdentifier(name.escape_debug().to_string()));
    }
    Ok(())
}

impl<T> Clone for Schema<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> PartialEq for Schema<T> {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

impl<T> Eq for Schema<T> {}

impl<T> Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("entity", &any::type_name::<T>())
            .field("columns", &self.columns)
            .finish()
    }
}
