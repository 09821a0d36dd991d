use strata::{Connection, Entity, Error, HasDefault, Sql, Statement};

#[derive(Entity, Default, Debug, PartialEq)]
#[strata(table = "Test", default)]
struct S {
    name: String,
    ndx: i64,
}

pub fn instantiate<C: Connection>(connection: &mut C) {
    let schema = S::schema().expect("Failed to build the schema of S");
    connection
        .execute(r#"DROP TABLE IF EXISTS "Test""#)
        .expect("Failed to drop the Test table");
    connection
        .execute("CREATE TABLE Test (name TEXT, ndx INT)")
        .expect("Failed to create the Test table");
    connection
        .execute("INSERT INTO Test (name, ndx) VALUES ('alpha', 1)")
        .expect("Failed to insert into the Test table");

    // Projection without `ndx`
    let mut statement = connection
        .prepare("SELECT name FROM Test")
        .expect("Failed to prepare the partial select");
    assert!(statement.step().expect("Failed to step the partial select"));
    assert_eq!(
        schema.instantiate(&statement, false),
        Ok(S {
            name: "alpha".into(),
            ndx: 0,
        })
    );
    assert_eq!(
        schema.instantiate_strict(&statement),
        Err(Error::MissingColumn {
            field: "ndx".into()
        })
    );
    assert!(!statement.step().expect("Failed to finish the partial select"));

    // Full projection
    let sql = schema
        .sql(Sql::Select("Test"))
        .expect("Failed to render the select");
    assert_eq!(sql, r#"SELECT "name", "ndx" FROM "Test""#);
    let mut statement = connection
        .prepare(&sql)
        .expect("Failed to prepare the full select");
    assert!(statement.step().expect("Failed to step the full select"));
    let value = schema
        .instantiate(&statement, true)
        .expect("Strict hydration of the full row failed");
    assert_eq!(
        value,
        S {
            name: "alpha".into(),
            ndx: 1,
        }
    );
    assert_eq!(schema.instantiate_loose(&statement), Ok(value));
}

#[derive(Entity, Debug, Clone, PartialEq)]
struct Triple {
    alpha: i64,
    bravo: String,
    charlie: f64,
}

impl HasDefault for Triple {
    fn make_default() -> Self {
        Self {
            alpha: 7,
            bravo: "seven".into(),
            charlie: 0.5,
        }
    }
}

/// Every non empty projection of the columns hydrates in loose mode, and only
/// the full one in strict mode.
pub fn projection_subsets<C: Connection>(connection: &mut C) {
    let schema = Triple::schema().expect("Failed to build the schema of Triple");
    schema
        .drop_table(connection, "triple", true)
        .expect("Failed to drop the triple table");
    schema
        .create_table(connection, "triple", false)
        .expect("Failed to create the triple table");
    let stored = Triple {
        alpha: -3,
        bravo: "three".into(),
        charlie: 3.25,
    };
    assert_eq!(
        schema
            .insert_one(connection, "triple", &stored)
            .expect("Failed to insert the triple"),
        1
    );
    let defaults = Triple::make_default();
    let names: Vec<_> = schema.columns().iter().map(|c| c.name).collect();
    for mask in 1..(1u32 << names.len()) {
        let projection: Vec<_> = names
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, name)| format!(r#""{}""#, name))
            .collect();
        let sql = format!(r#"SELECT {} FROM "triple""#, projection.join(", "));
        let mut statement = connection
            .prepare(&sql)
            .expect("Failed to prepare the projection");
        assert!(statement.step().expect("Failed to step the projection"));
        let value = schema
            .instantiate_loose(&statement)
            .expect("Loose hydration must not fail on a projection");
        let pick = |i: usize| mask & (1 << i) != 0;
        assert_eq!(
            value,
            Triple {
                alpha: if pick(0) { stored.alpha } else { defaults.alpha },
                bravo: if pick(1) {
                    stored.bravo.clone()
                } else {
                    defaults.bravo.clone()
                },
                charlie: if pick(2) {
                    stored.charlie
                } else {
                    defaults.charlie
                },
            },
            "{}",
            sql
        );
        let strict = schema.instantiate_strict(&statement);
        if projection.len() == names.len() {
            assert_eq!(strict, Ok(stored.clone()));
        } else {
            assert!(
                matches!(strict, Err(Error::MissingColumn { .. })),
                "{}: {:?}",
                sql,
                strict
            );
        }
    }
}
