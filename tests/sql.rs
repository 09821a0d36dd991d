#[cfg(test)]
mod tests {
    use indoc::indoc;
    use strata::{Column, Entity, Error, GenericSqlWriter, Sql, SqlType, SqlWriter};
    use time::{PrimitiveDateTime, macros::datetime};
    use uuid::Uuid;

    /// Statements render on a single line, the expected text is wrapped for
    /// readability.
    fn one_line(sql: &str) -> String {
        sql.trim().lines().collect::<Vec<_>>().join(" ")
    }

    #[derive(Entity, Default)]
    #[strata(table = "my_table", default)]
    struct Table {
        #[strata(name = "special column")]
        _first_column: Option<String>,
        _second_column: f64,
        #[strata(primary_key)]
        _third_column: i32,
        #[strata(name = "say \"hi\"")]
        _fourth: Option<Vec<u8>>,
    }

    #[test]
    fn test_1() {
        let schema = Table::schema().expect("Failed to build the schema");
        assert_eq!(
            schema.sql(Sql::Create("my_table")),
            Ok(one_line(indoc! {r#"
                CREATE TABLE "my_table" ("special column" TEXT,
                "second_column" REAL NOT NULL,
                "third_column" INTEGER PRIMARY KEY,
                "say ""hi""" BLOB)
            "#}))
        );
        assert_eq!(
            schema.sql(Sql::CreateIfNotExists("my_table")),
            Ok(one_line(indoc! {r#"
                CREATE TABLE IF NOT EXISTS "my_table" ("special column" TEXT,
                "second_column" REAL NOT NULL,
                "third_column" INTEGER PRIMARY KEY,
                "say ""hi""" BLOB)
            "#}))
        );
        assert_eq!(
            schema.sql(Sql::Insert("my_table")),
            Ok(one_line(indoc! {r#"
                INSERT INTO "my_table" ("special column", "second_column", "third_column", "say ""hi""")
                VALUES (?, ?, ?, ?)
            "#}))
        );
        assert_eq!(
            schema.sql(Sql::Select("my_table")),
            Ok(one_line(indoc! {r#"
                SELECT "special column", "second_column", "third_column", "say ""hi"""
                FROM "my_table"
            "#}))
        );
        assert_eq!(
            schema.sql(Sql::Drop("my_table")),
            Ok(r#"DROP TABLE "my_table""#.into())
        );
        assert_eq!(
            schema.sql(Sql::DropIfExists("my_table")),
            Ok(r#"DROP TABLE IF EXISTS "my_table""#.into())
        );
    }

    #[test]
    fn test_2() {
        #[derive(Entity)]
        struct Event {
            id: Uuid,
            at: PrimitiveDateTime,
            #[strata(name = "select")]
            kind: String,
        }
        impl strata::HasDefault for Event {
            fn make_default() -> Self {
                Self {
                    id: Uuid::nil(),
                    at: datetime!(2000-01-01 0:00),
                    kind: String::new(),
                }
            }
        }
        let schema = Event::schema().expect("Failed to build the schema");
        let create = schema
            .sql(Sql::Create(Event::table_name()))
            .expect("Failed to render the create");
        assert_eq!(
            create,
            r#"CREATE TABLE "event" ("id" TEXT NOT NULL, "at" TEXT NOT NULL, "select" TEXT NOT NULL)"#
        );
        // Same input, same output
        for _ in 0..3 {
            assert_eq!(schema.sql(Sql::Create(Event::table_name())), Ok(create.clone()));
        }
        assert_eq!(
            schema.sql(Sql::Select("we\"ird")),
            Ok(r#"SELECT "id", "at", "select" FROM "we""ird""#.into())
        );
    }

    #[test]
    fn invalid_identifiers() {
        #[derive(Entity, Default)]
        #[strata(default)]
        struct Empty {
            #[strata(name = "")]
            value: i32,
        }
        assert_eq!(
            Empty::schema().map(|_| ()),
            Err(Error::InvalidIdentifier(String::new()))
        );

        #[derive(Entity, Default)]
        #[strata(default)]
        struct Twice {
            first: i32,
            #[strata(name = "first")]
            second: i64,
        }
        assert_eq!(
            Twice::schema().map(|_| ()),
            Err(Error::DuplicateColumn("first".into()))
        );

        let schema = Table::schema().expect("Failed to build the schema");
        assert_eq!(
            schema.sql(Sql::Select("")),
            Err(Error::InvalidIdentifier(String::new()))
        );
        assert_eq!(
            schema.sql(Sql::Insert("nul\0")),
            Err(Error::InvalidIdentifier("nul\\0".into()))
        );
    }

    #[test]
    fn custom_writer() {
        struct NumberedWriter;
        impl SqlWriter for NumberedWriter {
            fn write_placeholder(&self, out: &mut String, ordinal: usize) {
                out.push('$');
                out.push_str(&(ordinal + 1).to_string());
            }
            fn write_column_type(&self, out: &mut String, value: SqlType) {
                out.push_str(match value {
                    SqlType::Integer => "BIGINT",
                    SqlType::Real => "DOUBLE PRECISION",
                    SqlType::Text => "VARCHAR",
                    SqlType::Blob => "BYTEA",
                    SqlType::Null => "",
                });
            }
        }
        let schema = Table::schema().expect("Failed to build the schema");
        assert_eq!(
            schema.sql_with(&NumberedWriter, Sql::Insert("my_table")),
            Ok(one_line(indoc! {r#"
                INSERT INTO "my_table" ("special column", "second_column", "third_column", "say ""hi""")
                VALUES ($1, $2, $3, $4)
            "#}))
        );
        assert_eq!(
            schema.sql_with(&NumberedWriter, Sql::Create("t")),
            Ok(one_line(indoc! {r#"
                CREATE TABLE "t" ("special column" VARCHAR,
                "second_column" DOUBLE PRECISION NOT NULL,
                "third_column" BIGINT PRIMARY KEY,
                "say ""hi""" BYTEA)
            "#}))
        );

        let mut out = String::new();
        GenericSqlWriter::new().write_create_table_column_fragment(
            &mut out,
            &Column {
                name: "anything",
                sql_type: SqlType::Null,
                nullable: true,
                primary_key: false,
                ordinal: 0,
            },
        );
        assert_eq!(out, r#""anything""#);
    }
}
