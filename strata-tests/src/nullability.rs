use strata::{Connection, Entity, Error, Sql, Statement};

#[derive(Entity, Default, Debug, Clone, PartialEq)]
#[strata(default)]
struct Nullable {
    #[strata(primary_key)]
    id: i64,
    nickname: Option<String>,
    score: Option<i32>,
    #[strata(not_null)]
    code: Option<String>,
}

#[derive(Entity, Default, Debug, PartialEq)]
#[strata(table = "required", default)]
struct Required {
    name: String,
    ndx: i64,
}

pub fn nullability<C: Connection>(connection: &mut C) {
    let schema = Nullable::schema().expect("Failed to build the schema of Nullable");
    assert_eq!(
        schema.sql(Sql::Create("nullable")),
        Ok(r#"CREATE TABLE "nullable" ("id" INTEGER PRIMARY KEY, "nickname" TEXT, "score" INTEGER, "code" TEXT NOT NULL)"#.into())
    );
    schema
        .drop_table(connection, "nullable", true)
        .expect("Failed to drop the nullable table");
    schema
        .create_table(connection, "nullable", false)
        .expect("Failed to create the nullable table");
    let values = [
        Nullable {
            id: 1,
            nickname: None,
            score: Some(-40),
            code: Some("x".into()),
        },
        Nullable {
            id: 2,
            nickname: Some("nick".into()),
            score: None,
            code: Some(String::new()),
        },
    ];
    schema
        .insert_many(connection, "nullable", &values)
        .expect("Failed to insert the nullable values");
    assert_eq!(
        schema
            .select_all(connection, "nullable", true)
            .expect("Failed to select the nullable values"),
        values
    );

    // Absent value on a forced NOT NULL column
    let missing_code = Nullable {
        id: 3,
        ..Default::default()
    };
    let mut insert = connection
        .prepare(
            &schema
                .sql(Sql::Insert("nullable"))
                .expect("Failed to render the insert"),
        )
        .expect("Failed to prepare the insert");
    assert_eq!(
        insert.bind_entity(&schema, &missing_code).map(|_| ()),
        Err(Error::ConstraintViolation {
            field: "code".into()
        })
    );
    assert_eq!(
        schema.insert_one(connection, "nullable", &missing_code),
        Err(Error::ConstraintViolation {
            field: "code".into()
        })
    );

    // Stored values the field types cannot take
    let schema = Required::schema().expect("Failed to build the schema of Required");
    connection
        .execute(r#"DROP TABLE IF EXISTS "required""#)
        .expect("Failed to drop the required table");
    connection
        .execute(r#"CREATE TABLE "required" ("name" TEXT, "ndx" INTEGER)"#)
        .expect("Failed to create the required table");
    connection
        .execute(r#"INSERT INTO "required" VALUES ('absent', NULL), ('text', 'not a number')"#)
        .expect("Failed to insert into the required table");
    let mut select = connection
        .prepare(
            &schema
                .sql(Sql::Select("required"))
                .expect("Failed to render the select"),
        )
        .expect("Failed to prepare the select");
    assert!(select.step().expect("Failed to step the select"));
    for strict in [false, true] {
        assert_eq!(
            schema.instantiate(&select, strict),
            Err(Error::Coercion {
                field: "ndx".into(),
                from: "NULL",
                to: "i64",
            })
        );
    }
    assert!(select.step().expect("Failed to step the select"));
    for strict in [false, true] {
        assert_eq!(
            schema.instantiate(&select, strict),
            Err(Error::Coercion {
                field: "ndx".into(),
                from: "TEXT",
                to: "i64",
            })
        );
    }
    assert!(!select.step().expect("Failed to finish the select"));
}
