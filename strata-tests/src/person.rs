use strata::{Connection, Entity, Error, HasDefault, Sql};
use time::{Date, PrimitiveDateTime, macros::date, macros::datetime};

#[allow(dead_code)]
#[derive(Entity)]
struct Person {
    id: i64,
    name: String,
    date: PrimitiveDateTime,
    dob: Option<Date>,
    tags: Vec<String>,
    friends: Vec<Person>,
}

impl HasDefault for Person {
    fn make_default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            date: datetime!(1970-01-01 0:00),
            dob: None,
            tags: Vec::new(),
            friends: Vec::new(),
        }
    }
}

#[allow(dead_code)]
#[derive(Entity)]
#[strata(table = "person")]
struct PersonWithFriends {
    id: i64,
    name: String,
    date: PrimitiveDateTime,
    dob: Option<Date>,
    #[strata(skip)]
    _tags: Vec<String>,
    friends: Vec<PersonWithFriends>,
}

impl HasDefault for PersonWithFriends {
    fn make_default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            date: datetime!(1970-01-01 0:00),
            dob: None,
            _tags: Vec::new(),
            friends: Vec::new(),
        }
    }
}

#[derive(Entity, Debug, Clone, PartialEq)]
#[strata(table = "person")]
struct PersonRecord {
    #[strata(primary_key)]
    id: i64,
    name: String,
    date: PrimitiveDateTime,
    dob: Option<Date>,
    #[strata(skip)]
    tags: Vec<String>,
    #[strata(skip)]
    friends: Vec<PersonRecord>,
}

impl HasDefault for PersonRecord {
    fn make_default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            date: datetime!(1970-01-01 0:00),
            dob: None,
            tags: Vec::new(),
            friends: Vec::new(),
        }
    }
}

pub fn person<C: Connection>(connection: &mut C) {
    // Collections and nested entities have no column
    assert_eq!(
        Person::schema().map(|_| ()),
        Err(Error::UnsupportedType {
            field: "tags".into(),
            type_name: "Vec<String>".into(),
        })
    );
    assert_eq!(
        PersonWithFriends::schema().map(|_| ()),
        Err(Error::UnsupportedType {
            field: "friends".into(),
            type_name: "Vec<PersonWithFriends>".into(),
        })
    );
    let person = Person::make_default();
    assert!(matches!(
        person.field_value(4),
        Err(Error::UnsupportedType { .. })
    ));

    let schema = PersonRecord::schema().expect("Failed to build the schema of PersonRecord");
    assert_eq!(
        schema.sql(Sql::Create("person")),
        Ok(r#"CREATE TABLE "person" ("id" INTEGER PRIMARY KEY, "name" TEXT NOT NULL, "date" TEXT NOT NULL, "dob" TEXT)"#.into())
    );
    schema
        .drop_table(connection, "person", true)
        .expect("Failed to drop the person table");
    schema
        .create_table(connection, "person", false)
        .expect("Failed to create the person table");
    let friend = PersonRecord {
        id: 2,
        name: "Grace".into(),
        date: datetime!(2024-03-01 8:30:00),
        dob: None,
        tags: Vec::new(),
        friends: Vec::new(),
    };
    let person = PersonRecord {
        id: 1,
        name: "Ada".into(),
        date: datetime!(2024-02-29 23:59:59.123456789),
        dob: Some(date!(1815 - 12 - 10)),
        tags: vec!["math".into(), "engines".into()],
        friends: vec![friend.clone()],
    };
    assert_eq!(
        schema
            .insert_many(connection, "person", [&person, &friend])
            .expect("Failed to insert the people"),
        2
    );
    let people = schema
        .select_all(connection, "person", true)
        .expect("Failed to select the people");
    // Skipped fields come back with their default value
    assert_eq!(
        people,
        [
            PersonRecord {
                tags: Vec::new(),
                friends: Vec::new(),
                ..person
            },
            friend,
        ]
    );
}
