use strata::{Connection, Entity, Sql, Statement, StatementState};

#[derive(Entity, Default, Debug, Clone, PartialEq)]
#[strata(default)]
struct Topic {
    id: String,
    name: String,
}

#[derive(Entity, Default, Debug, Clone, PartialEq)]
#[strata(default)]
struct RankedTopic {
    #[strata(primary_key)]
    id: i64,
    name: String,
    score: Option<f64>,
}

pub fn topic<C: Connection>(connection: &mut C) {
    let schema = Topic::schema().expect("Failed to build the schema of Topic");
    assert_eq!(
        schema.sql(Sql::Create("topic")),
        Ok(r#"CREATE TABLE "topic" ("id" TEXT NOT NULL, "name" TEXT NOT NULL)"#.into())
    );
    schema
        .drop_table(connection, "topic", true)
        .expect("Failed to drop the topic table");
    schema
        .create_table(connection, "topic", false)
        .expect("Failed to create the topic table");
    let topics = [
        Topic {
            id: "10".into(),
            name: "beta".into(),
        },
        Topic {
            id: "20".into(),
            name: "charlie".into(),
        },
    ];
    for topic in &topics {
        schema
            .insert_one(connection, "topic", topic)
            .expect("Failed to insert the topic");
    }
    let mut select = connection
        .prepare(r#"SELECT * FROM "topic""#)
        .expect("Failed to prepare the select");
    let mut result = Vec::new();
    while select.step().expect("Failed to step the select") {
        result.push(
            schema
                .instantiate(&select, false)
                .expect("Failed to instantiate the topic"),
        );
    }
    assert_eq!(result, topics);
}

pub fn ranked_topic<C: Connection>(connection: &mut C) {
    let schema = RankedTopic::schema().expect("Failed to build the schema of RankedTopic");
    schema
        .drop_table(connection, RankedTopic::table_name(), true)
        .expect("Failed to drop the topic table");
    schema
        .create_table(connection, RankedTopic::table_name(), true)
        .expect("Failed to create the topic table");
    // Again, nothing happens
    schema
        .create_table(connection, RankedTopic::table_name(), true)
        .expect("Failed to create the topic table if not exists");

    let topics = [
        RankedTopic {
            id: 1,
            name: "Ownership".into(),
            score: Some(4.5),
        },
        RankedTopic {
            id: 2,
            name: "Borrowing".into(),
            score: None,
        },
    ];

    let mut insert = connection
        .prepare(
            &schema
                .sql(Sql::Insert(RankedTopic::table_name()))
                .expect("Failed to render the insert"),
        )
        .expect("Failed to prepare the insert");
    assert_eq!(insert.state(), StatementState::Unbound);
    assert_eq!(insert.parameter_count(), 3);
    for topic in &topics {
        let changed = insert
            .reset()
            .expect("Failed to reset the insert")
            .bind_entity(&schema, topic)
            .expect("Failed to bind the topic")
            .execute()
            .expect("Failed to execute the insert");
        assert_eq!(changed, 1);
        assert_eq!(insert.state(), StatementState::Exhausted);
    }
    insert.reset().expect("Failed to reset the insert");
    assert_eq!(insert.state(), StatementState::Bound);
    insert
        .clear_bindings()
        .expect("Failed to clear the bindings");
    assert_eq!(insert.state(), StatementState::Unbound);

    let mut select = connection
        .prepare(
            &schema
                .sql(Sql::Select(RankedTopic::table_name()))
                .expect("Failed to render the select"),
        )
        .expect("Failed to prepare the select");
    assert_eq!(select.column_names(), ["id", "name", "score"]);
    for expected in &topics {
        assert!(select.step().expect("Failed to step the select"));
        assert_eq!(select.state(), StatementState::Executing);
        assert_eq!(
            select.column_by_name("name"),
            Ok(Some(expected.name.as_str().into()))
        );
        assert_eq!(select.column_by_name("missing"), Ok(None));
        assert_eq!(schema.instantiate(&select, true).as_ref(), Ok(expected));
    }
    assert!(!select.step().expect("Failed to finish the select"));
    assert_eq!(select.state(), StatementState::Exhausted);
    // Stays exhausted until reset
    assert!(!select.step().expect("Exhausted step must not fail"));

    select.reset().expect("Failed to reset the select");
    assert!(select.step().expect("Failed to step the select again"));
    assert_eq!(schema.instantiate(&select, true), Ok(topics[0].clone()));

    assert_eq!(
        schema
            .select_all(connection, RankedTopic::table_name(), true)
            .expect("Failed to select all topics"),
        topics
    );
}
