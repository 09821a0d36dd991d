#[cfg(test)]
mod tests {
    use strata::{Connection, Entity, Error, Sql, Statement, StatementState, Value};
    use strata_sqlite::SqliteConnection;
    use strata_tests::{init_logs, silent_logs};

    #[derive(Entity, Default, Debug, PartialEq)]
    #[strata(default)]
    struct Item {
        #[strata(primary_key)]
        id: i64,
        label: String,
    }

    #[test]
    fn create_database() {
        init_logs();
        let directory = tempfile::tempdir().expect("Could not create a temporary directory");
        let path = directory.path().join("creation.sqlite");
        assert!(!path.exists(), "Database file should not exist before test");
        silent_logs! {
            assert!(
                SqliteConnection::connect(&format!("sqlite://{}?mode=ro", path.display())).is_err(),
                "Should not be able to open in read only unexisting database"
            );
        }
        SqliteConnection::connect(&format!("sqlite://{}?mode=rwc", path.display()))
            .expect("Could not open the database");
        assert!(
            path.exists(),
            "Database file should be created after connection"
        );
        SqliteConnection::connect(&format!("sqlite://{}?mode=ro", path.display()))
            .expect("Could not open the database in read only mode");
    }

    #[test]
    fn wrong_url() {
        silent_logs! {
            assert!(matches!(
                SqliteConnection::connect("duckdb://some_value"),
                Err(Error::Connection(..))
            ));
        }
    }

    #[test]
    fn prepare_errors() {
        init_logs();
        let mut connection = SqliteConnection::memory().expect("Could not open the database");
        silent_logs! {
            assert!(matches!(
                connection.prepare("SELECT 1; SELECT 2"),
                Err(Error::Sql { .. })
            ));
            assert!(matches!(
                connection.prepare("SELECT * FROM missing_table"),
                Err(Error::Sql { .. })
            ));
            assert!(matches!(connection.prepare("   "), Err(Error::Sql { .. })));
            assert!(matches!(
                connection.execute("CREATE TABLE"),
                Err(Error::Sql { .. })
            ));
        }
        assert!(connection.prepare("SELECT 1;  ").is_ok());
    }

    #[test]
    fn statement_states() {
        init_logs();
        let mut connection = SqliteConnection::memory().expect("Could not open the database");
        let schema = Item::schema().expect("Failed to build the schema of Item");
        schema
            .create_table(&mut connection, "item", false)
            .expect("Failed to create the item table");
        let mut insert = connection
            .prepare(
                &schema
                    .sql(Sql::Insert("item"))
                    .expect("Failed to render the insert"),
            )
            .expect("Failed to prepare the insert");
        assert_eq!(insert.state(), StatementState::Unbound);
        insert
            .bind(1)
            .expect("Failed to bind the id")
            .bind(String::from("first"))
            .expect("Failed to bind the label");
        assert_eq!(insert.state(), StatementState::Bound);
        assert_eq!(insert.execute(), Ok(1));
        assert_eq!(insert.state(), StatementState::Exhausted);

        // Rebinding requires a reset
        let second = Item {
            id: 2,
            label: "second".into(),
        };
        silent_logs! {
            assert_eq!(
                insert.bind_entity(&schema, &second).map(|_| ()),
                Err(Error::StatementState {
                    operation: "bind",
                    state: StatementState::Exhausted,
                })
            );
            assert!(matches!(
                insert.execute(),
                Err(Error::StatementState { .. })
            ));
        }
        assert_eq!(
            insert
                .reset()
                .expect("Failed to reset the insert")
                .bind_entity(&schema, &second)
                .expect("Failed to bind the item")
                .execute(),
            Ok(1)
        );

        // Duplicate primary key
        silent_logs! {
            assert!(matches!(
                insert.reset().expect("Failed to reset the insert").execute(),
                Err(Error::Sql { .. })
            ));
        }

        let mut select = connection
            .prepare(r#"SELECT "label", "id", "label" FROM "item" ORDER BY "id""#)
            .expect("Failed to prepare the select");
        silent_logs! {
            assert!(matches!(
                select.column(0),
                Err(Error::StatementState { .. })
            ));
        }
        assert_eq!(select.step(), Ok(true));
        assert_eq!(select.column(1), Ok(Value::Integer(1)));
        assert!(matches!(select.column(3), Err(Error::Sql { .. })));
        // Duplicate labels, the first one is used
        assert_eq!(
            schema.instantiate(&select, true),
            Ok(Item {
                id: 1,
                label: "first".into(),
            })
        );
        assert_eq!(select.step(), Ok(true));
        assert_eq!(select.step(), Ok(false));
        assert_eq!(select.step(), Ok(false));
    }

    #[derive(Entity, Default, Debug, PartialEq)]
    #[strata(default)]
    struct Pair {
        a: i64,
        b: i64,
    }

    #[test]
    fn labels_follow_schema_changes() {
        init_logs();
        let mut connection = SqliteConnection::memory().expect("Could not open the database");
        connection
            .execute(r#"CREATE TABLE "pair" ("a" INTEGER NOT NULL); INSERT INTO "pair" VALUES (1)"#)
            .expect("Failed to create the pair table");
        let mut select = connection
            .prepare(r#"SELECT * FROM "pair""#)
            .expect("Failed to prepare the select");
        assert_eq!(select.column_names(), ["a"]);
        connection
            .execute(r#"ALTER TABLE "pair" ADD COLUMN "b" INTEGER DEFAULT 7"#)
            .expect("Failed to alter the pair table");

        assert_eq!(select.step(), Ok(true));
        assert_eq!(select.column_names(), ["a", "b"]);
        assert_eq!(select.column(1), Ok(Value::Integer(7)));
        let schema = Pair::schema().expect("Failed to build the schema of Pair");
        assert_eq!(schema.instantiate(&select, true), Ok(Pair { a: 1, b: 7 }));
        assert_eq!(schema.instantiate(&select, false), Ok(Pair { a: 1, b: 7 }));
    }

    #[test]
    fn statement_outlives_connection() {
        init_logs();
        let mut connection = SqliteConnection::memory().expect("Could not open the database");
        connection
            .execute(r#"CREATE TABLE "pair" ("a" INTEGER, "b" INTEGER); INSERT INTO "pair" VALUES (3, 4)"#)
            .expect("Failed to create the pair table");
        let mut select = connection
            .prepare(r#"SELECT "a", "b" FROM "pair""#)
            .expect("Failed to prepare the select");
        drop(connection);
        assert_eq!(select.step(), Ok(true));
        assert_eq!(select.column(0), Ok(Value::Integer(3)));
        assert_eq!(select.column(1), Ok(Value::Integer(4)));
        assert_eq!(select.step(), Ok(false));
    }

    #[test]
    fn blobs_and_nulls() {
        init_logs();
        let mut connection = SqliteConnection::memory().expect("Could not open the database");
        let mut select = connection
            .prepare("SELECT ?, ?, ?, ?")
            .expect("Failed to prepare the select");
        assert_eq!(select.parameter_count(), 4);
        select
            .bind_index(Value::Blob(Vec::new()), 1)
            .expect("Failed to bind the blob")
            .bind_index(Value::Null, 2)
            .expect("Failed to bind null")
            .bind_index(Value::Real(1.5), 3)
            .expect("Failed to bind the real")
            .bind(Some(String::from("text")))
            .expect("Failed to bind the text");
        assert_eq!(select.step(), Ok(true));
        assert_eq!(select.column(0), Ok(Value::Blob(Vec::new())));
        assert_eq!(select.column(1), Ok(Value::Null));
        assert_eq!(select.column(2), Ok(Value::Real(1.5)));
        assert_eq!(select.column(3), Ok(Value::Text("text".into())));
        silent_logs! {
            assert!(matches!(
                select.bind_index(Value::Integer(1), 5),
                Err(Error::StatementState { .. })
            ));
        }
        select.reset().expect("Failed to reset the select");
        silent_logs! {
            assert!(matches!(
                select.bind_index(Value::Integer(1), 5),
                Err(Error::Sql { .. })
            ));
        }
    }
}
