use crate::{Column, SqlType, separated_by};

/// Statement to render, with the table name it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sql<'a> {
    Create(&'a str),
    CreateIfNotExists(&'a str),
    Insert(&'a str),
    Select(&'a str),
    Drop(&'a str),
    DropIfExists(&'a str),
}

impl<'a> Sql<'a> {
    pub fn table(&self) -> &'a str {
        match *self {
            Sql::Create(v)
            | Sql::CreateIfNotExists(v)
            | Sql::Insert(v)
            | Sql::Select(v)
            | Sql::Drop(v)
            | Sql::DropIfExists(v) => v,
        }
    }
}

/// Dialect printer turning a column list into statements.
///
/// Every method has a default implementation producing SQLite compatible
/// text; a dialect overrides only what differs.
pub trait SqlWriter {
    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote identifiers ("name") doubling inner quotes.
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', "\"\"");
        out.push('"');
    }

    fn write_column_type(&self, out: &mut String, value: SqlType) {
        match value {
            SqlType::Integer => out.push_str("INTEGER"),
            SqlType::Real => out.push_str("REAL"),
            SqlType::Text => out.push_str("TEXT"),
            SqlType::Blob => out.push_str("BLOB"),
            // Untyped column
            SqlType::Null => {}
        }
    }

    fn write_create_table_column_fragment(&self, out: &mut String, column: &Column) {
        self.write_identifier_quoted(out, column.name);
        let len = out.len();
        out.push(' ');
        self.write_column_type(out, column.sql_type);
        if out.len() == len + 1 {
            out.truncate(len);
        }
        if !column.nullable && !column.primary_key {
            out.push_str(" NOT NULL");
        }
        if column.primary_key {
            out.push_str(" PRIMARY KEY");
        }
    }

    fn write_create_table(
        &self,
        out: &mut String,
        columns: &[Column],
        table: &str,
        if_not_exists: bool,
    ) {
        out.push_str("CREATE TABLE ");
        if if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        self.write_identifier_quoted(out, table);
        out.push_str(" (");
        separated_by(
            out,
            columns,
            |out, v| self.write_create_table_column_fragment(out, v),
            ", ",
        );
        out.push(')');
    }

    fn write_drop_table(&self, out: &mut String, table: &str, if_exists: bool) {
        out.push_str("DROP TABLE ");
        if if_exists {
            out.push_str("IF EXISTS ");
        }
        self.write_identifier_quoted(out, table);
    }

    fn write_placeholder(&self, out: &mut String, _ordinal: usize) {
        out.push('?');
    }

    fn write_insert(&self, out: &mut String, columns: &[Column], table: &str) {
        out.push_str("INSERT INTO ");
        self.write_identifier_quoted(out, table);
        out.push_str(" (");
        separated_by(
            out,
            columns,
            |out, v| self.write_identifier_quoted(out, v.name),
            ", ",
        );
        out.push_str(") VALUES (");
        separated_by(
            out,
            columns,
            |out, v| self.write_placeholder(out, v.ordinal),
            ", ",
        );
        out.push(')');
    }

    fn write_select(&self, out: &mut String, columns: &[Column], table: &str) {
        out.push_str("SELECT ");
        separated_by(
            out,
            columns,
            |out, v| self.write_identifier_quoted(out, v.name),
            ", ",
        );
        out.push_str(" FROM ");
        self.write_identifier_quoted(out, table);
    }
}

#[derive(Default)]
pub struct GenericSqlWriter {}

impl GenericSqlWriter {
    pub fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for GenericSqlWriter {}
