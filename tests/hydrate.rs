#[cfg(test)]
mod tests {
    use strata::{
        AsValue, Entity, Error, HasDefault, Result, Statement, StatementState, Value,
    };

    /// In memory statement holding a single row.
    #[derive(Default)]
    struct RowStatement {
        labels: Vec<String>,
        row: Vec<Value>,
        bound: Vec<(usize, Value)>,
        state: StatementState,
    }

    impl RowStatement {
        fn with_row(row: &[(&str, Value)]) -> Self {
            Self {
                labels: row.iter().map(|(k, _)| k.to_string()).collect(),
                row: row.iter().map(|(_, v)| v.clone()).collect(),
                state: StatementState::Executing,
                ..Default::default()
            }
        }
    }

    impl Statement for RowStatement {
        fn state(&self) -> StatementState {
            self.state
        }
        fn parameter_count(&self) -> usize {
            usize::MAX
        }
        fn bind_index(&mut self, value: Value, position: usize) -> Result<&mut Self> {
            self.bound.push((position, value));
            self.state = StatementState::Bound;
            Ok(self)
        }
        fn bind<V: AsValue>(&mut self, value: V) -> Result<&mut Self> {
            let position = self.bound.len() + 1;
            let value = value.as_value().map_err(|e| e.for_field("?"))?;
            self.bind_index(value, position)
        }
        fn clear_bindings(&mut self) -> Result<&mut Self> {
            self.bound.clear();
            self.state = StatementState::Unbound;
            Ok(self)
        }
        fn execute(&mut self) -> Result<u64> {
            self.state = StatementState::Exhausted;
            Ok(1)
        }
        fn step(&mut self) -> Result<bool> {
            Ok(false)
        }
        fn reset(&mut self) -> Result<&mut Self> {
            Ok(self)
        }
        fn column_names(&self) -> &[String] {
            &self.labels
        }
        fn column(&self, index: usize) -> Result<Value> {
            Ok(self.row[index].clone())
        }
    }

    #[derive(Entity, Debug, PartialEq)]
    struct Account {
        #[strata(primary_key)]
        id: u32,
        owner: String,
        balance: f64,
        frozen: bool,
        note: Option<String>,
    }

    impl HasDefault for Account {
        fn make_default() -> Self {
            Self {
                id: 0,
                owner: "nobody".into(),
                balance: 10.0,
                frozen: false,
                note: Some("new".into()),
            }
        }
    }

    #[test]
    fn loose_keeps_defaults() {
        let schema = Account::schema().expect("Failed to build the schema");
        let statement = RowStatement::with_row(&[
            ("balance", Value::Integer(25)),
            ("id", Value::Integer(4)),
            ("unrelated", Value::Text("ignored".into())),
        ]);
        assert_eq!(
            schema.instantiate(&statement, false),
            Ok(Account {
                id: 4,
                owner: "nobody".into(),
                balance: 25.0,
                frozen: false,
                note: Some("new".into()),
            })
        );
        assert_eq!(
            schema.instantiate(&statement, true),
            Err(Error::MissingColumn {
                field: "owner".into()
            })
        );
        let empty = RowStatement::with_row(&[]);
        assert_eq!(
            schema.instantiate_loose(&empty),
            Ok(Account::make_default())
        );
    }

    #[test]
    fn strict_full_row() {
        let schema = Account::schema().expect("Failed to build the schema");
        let statement = RowStatement::with_row(&[
            ("note", Value::Null),
            ("frozen", Value::Integer(2)),
            ("balance", Value::Real(-1.5)),
            ("owner", Value::Text("Rhea".into())),
            ("id", Value::Integer(9)),
            ("owner", Value::Text("Shadowed".into())),
        ]);
        assert_eq!(
            schema.instantiate_strict(&statement),
            Ok(Account {
                id: 9,
                owner: "Rhea".into(),
                balance: -1.5,
                frozen: true,
                note: None,
            })
        );
    }

    #[test]
    fn coercion_failures() {
        let schema = Account::schema().expect("Failed to build the schema");
        let negative = RowStatement::with_row(&[("id", Value::Integer(-1))]);
        // Conversion errors are raised in both modes
        for strict in [false, true] {
            assert_eq!(
                schema.instantiate(&negative, strict),
                Err(Error::Coercion {
                    field: "id".into(),
                    from: "INTEGER",
                    to: "u32",
                })
            );
        }
        let absent = RowStatement::with_row(&[("owner", Value::Null)]);
        assert_eq!(
            schema.instantiate_loose(&absent),
            Err(Error::Coercion {
                field: "owner".into(),
                from: "NULL",
                to: "String",
            })
        );
        let blob = RowStatement::with_row(&[("frozen", Value::Blob(vec![1]))]);
        assert_eq!(
            schema.instantiate_loose(&blob),
            Err(Error::Coercion {
                field: "frozen".into(),
                from: "BLOB",
                to: "bool",
            })
        );
    }

    #[test]
    fn bind_in_schema_order() {
        let schema = Account::schema().expect("Failed to build the schema");
        let mut statement = RowStatement::default();
        let account = Account {
            id: 1,
            owner: "Rhea".into(),
            balance: 0.5,
            frozen: true,
            note: None,
        };
        statement
            .bind_entity(&schema, &account)
            .expect("Failed to bind the account");
        assert_eq!(statement.state(), StatementState::Bound);
        assert_eq!(
            statement.bound,
            [
                (1, Value::Integer(1)),
                (2, Value::Text("Rhea".into())),
                (3, Value::Real(0.5)),
                (4, Value::Integer(1)),
                (5, Value::Null),
            ]
        );
    }

    #[test]
    fn bind_checks_before_binding() {
        #[derive(Entity, Default)]
        #[strata(default)]
        struct Reading {
            sensor: String,
            #[strata(not_null)]
            value: Option<f64>,
            raw: u64,
        }
        let schema = Reading::schema().expect("Failed to build the schema");
        let mut statement = RowStatement::default();
        let reading = Reading {
            sensor: "north".into(),
            value: None,
            raw: 3,
        };
        assert_eq!(
            schema.bind(&mut statement, &reading).map(|_| ()),
            Err(Error::ConstraintViolation {
                field: "value".into()
            })
        );
        assert!(statement.bound.is_empty());

        let reading = Reading {
            sensor: "north".into(),
            value: Some(1.0),
            raw: u64::MAX,
        };
        assert_eq!(
            schema.bind(&mut statement, &reading).map(|_| ()),
            Err(Error::Coercion {
                field: "raw".into(),
                from: "u64",
                to: "INTEGER",
            })
        );
        assert!(statement.bound.is_empty());
    }
}
