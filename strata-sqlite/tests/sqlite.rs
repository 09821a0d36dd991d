#[cfg(test)]
mod tests {
    use strata_sqlite::SqliteConnection;
    use strata_tests::{execute_tests, init_logs};

    #[test]
    fn sqlite_memory() {
        init_logs();
        let connection = SqliteConnection::memory().expect("Could not open the database");
        execute_tests(connection);
    }

    #[test]
    fn sqlite_file() {
        init_logs();
        let directory = tempfile::tempdir().expect("Could not create a temporary directory");
        let path = directory.path().join("tests.sqlite");
        assert!(!path.exists(), "Database file should not exist before test");
        let connection = SqliteConnection::connect(&format!("sqlite://{}?mode=rwc", path.display()))
            .expect("Could not open the database");
        execute_tests(connection);
        assert!(path.exists(), "Database file should be created by the tests");
    }
}
