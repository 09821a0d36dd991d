use strata::{Connection, Entity, Error, HasDefault, Sql};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time,
    macros::{date, datetime, time},
};
use uuid::Uuid;

#[derive(Entity, Debug, Clone, PartialEq)]
#[strata(table = "everything")]
struct Everything {
    #[strata(primary_key)]
    id: i64,
    flag: bool,
    tiny: i8,
    small: i16,
    medium: i32,
    big: i64,
    unsigned: u32,
    huge: u64,
    size: usize,
    ratio: f32,
    precise: f64,
    letter: char,
    #[strata(name = "label")]
    text: String,
    bytes: Vec<u8>,
    date: Date,
    time: Time,
    timestamp: PrimitiveDateTime,
    zoned: OffsetDateTime,
    uuid: Uuid,
    maybe: Option<String>,
}

impl HasDefault for Everything {
    fn make_default() -> Self {
        Self {
            id: 0,
            flag: false,
            tiny: 0,
            small: 0,
            medium: 0,
            big: 0,
            unsigned: 0,
            huge: 0,
            size: 0,
            ratio: 0.0,
            precise: 0.0,
            letter: ' ',
            text: String::new(),
            bytes: Vec::new(),
            date: date!(1970 - 01 - 01),
            time: time!(0:00),
            timestamp: datetime!(1970-01-01 0:00),
            zoned: datetime!(1970-01-01 0:00 UTC),
            uuid: Uuid::nil(),
            maybe: None,
        }
    }
}

pub fn round_trip<C: Connection>(connection: &mut C) {
    let schema = Everything::schema().expect("Failed to build the schema of Everything");
    assert_eq!(
        schema.sql(Sql::Insert("everything")),
        schema.sql(Sql::Insert("everything")),
    );
    assert!(schema.column("label").is_some());
    assert!(schema.column("text").is_none());
    schema
        .drop_table(connection, "everything", true)
        .expect("Failed to drop the everything table");
    schema
        .create_table(connection, "everything", true)
        .expect("Failed to create the everything table");

    let first = Everything {
        id: 1,
        flag: true,
        tiny: i8::MIN,
        small: i16::MAX,
        medium: -123_456,
        big: i64::MIN,
        unsigned: u32::MAX,
        huge: 9_876_543_210,
        size: 42,
        ratio: 0.25,
        precise: std::f64::consts::PI,
        letter: 'é',
        text: "Hello \"world\"".into(),
        bytes: vec![0, 1, 2, 255],
        date: date!(2025 - 10 - 14),
        time: time!(12:34:56.000000789),
        timestamp: datetime!(2025-10-14 12:34:56.5),
        zoned: datetime!(2025-10-14 12:34:56 +02:00),
        uuid: Uuid::parse_str("5e915574-bb30-4430-98cf-c5854f61fbbd")
            .expect("Failed to parse the uuid"),
        maybe: Some("maybe".into()),
    };
    let second = Everything {
        id: 2,
        bytes: Vec::new(),
        letter: '\'',
        text: String::new(),
        maybe: None,
        ..Everything::make_default()
    };
    assert_eq!(
        schema
            .insert_many(connection, "everything", [&first, &second])
            .expect("Failed to insert everything"),
        2
    );
    assert_eq!(
        schema
            .select_all(connection, "everything", true)
            .expect("Failed to select everything"),
        [first.clone(), second]
    );

    // Out of range for the storage
    let too_big = Everything {
        id: 3,
        huge: u64::MAX,
        ..first
    };
    assert_eq!(
        schema.insert_one(connection, "everything", &too_big),
        Err(Error::Coercion {
            field: "huge".into(),
            from: "u64",
            to: "INTEGER",
        })
    );
    assert_eq!(
        schema
            .select_all(connection, "everything", false)
            .expect("Failed to select everything")
            .len(),
        2
    );

    schema
        .drop_table(connection, "everything", false)
        .expect("Failed to drop the everything table");
}
