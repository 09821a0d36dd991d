use crate::{DeclaredType, Result, Schema, Value};

/// Canonical empty instance of a type.
///
/// Schemas are derived from it and loose hydration falls back to its field
/// values. `#[strata(default)]` implements it through [`Default`].
pub trait HasDefault {
    fn make_default() -> Self;
}

/// Static description of one mapped field, produced by `#[derive(Entity)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Column name.
    pub name: &'static str,
    /// Rust field identifier.
    pub field: &'static str,
    /// Field type as written.
    pub type_name: &'static str,
    pub declared: DeclaredType,
    pub primary_key: bool,
    /// Forces `NOT NULL` even on optional fields.
    pub not_null: bool,
}

/// A value type that can be reflected into columns.
///
/// Field indexes are positions in [`Entity::fields`], which lists fields in
/// declaration order without the skipped ones.
pub trait Entity: HasDefault + Sized {
    fn table_name() -> &'static str;

    fn fields() -> &'static [FieldDef];

    /// Current value of the field at `index`.
    fn field_value(&self, index: usize) -> Result<Value>;

    /// Converts `value` and assigns it to the field at `index`.
    fn set_field_value(&mut self, index: usize, value: Value) -> Result<()>;

    /// `(definition, current value)` for every field, in declaration order.
    fn reflect(&self) -> impl Iterator<Item = (&'static FieldDef, Result<Value>)> {
        Self::fields()
            .iter()
            .enumerate()
            .map(move |(i, def)| (def, self.field_value(i)))
    }

    fn schema() -> Result<Schema<Self>> {
        Schema::build()
    }
}
