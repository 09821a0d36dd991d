use crate::{Entity, Result, Schema, Sql, Statement};

/// Connection to a database, the source of statements.
pub trait Connection {
    type Statement: Statement;

    /// Run one or more statements that produce no rows.
    fn execute(&mut self, sql: &str) -> Result<()>;

    fn prepare(&mut self, sql: &str) -> Result<Self::Statement>;
}

/// Whole-table operations over a [`Connection`], each a thin combination of
/// rendering, binding and hydration.
impl<T: Entity> Schema<T> {
    pub fn create_table<C: Connection>(
        &self,
        connection: &mut C,
        table: &str,
        if_not_exists: bool,
    ) -> Result<()> {
        let sql = self.sql(if if_not_exists {
            Sql::CreateIfNotExists(table)
        } else {
            Sql::Create(table)
        })?;
        connection.execute(&sql)
    }

    pub fn drop_table<C: Connection>(
        &self,
        connection: &mut C,
        table: &str,
        if_exists: bool,
    ) -> Result<()> {
        let sql = self.sql(if if_exists {
            Sql::DropIfExists(table)
        } else {
            Sql::Drop(table)
        })?;
        connection.execute(&sql)
    }

    pub fn insert_one<C: Connection>(
        &self,
        connection: &mut C,
        table: &str,
        entity: &T,
    ) -> Result<u64> {
        let mut statement = connection.prepare(&self.sql(Sql::Insert(table))?)?;
        statement.bind_entity(self, entity)?.execute()
    }

    /// Inserts every item through a single prepared statement, reset between rows.
    pub fn insert_many<'a, C, It>(&self, connection: &mut C, table: &str, items: It) -> Result<u64>
    where
        T: 'a,
        C: Connection,
        It: IntoIterator<Item = &'a T>,
    {
        let mut statement = connection.prepare(&self.sql(Sql::Insert(table))?)?;
        let mut total = 0;
        for item in items {
            total += statement.reset()?.bind_entity(self, item)?.execute()?;
        }
        Ok(total)
    }

    /// Every row of `table`, in the order the database returns them.
    pub fn select_all<C: Connection>(
        &self,
        connection: &mut C,
        table: &str,
        strict: bool,
    ) -> Result<Vec<T>> {
        let mut statement = connection.prepare(&self.sql(Sql::Select(table))?)?;
        let mut result = Vec::new();
        while statement.step()? {
            result.push(self.instantiate(&statement, strict)?);
        }
        Ok(result)
    }
}
