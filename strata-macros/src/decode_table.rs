use crate::decode_column::{ColumnMetadata, decode_column, expect_flag};
use convert_case::{Case, Casing};
use syn::{Error, Fields, ItemStruct, LitStr, Result};

pub(crate) struct TableMetadata {
    pub(crate) item: ItemStruct,
    pub(crate) name: String,
    pub(crate) default: bool,
    /// Mapped fields only, skipped ones are left out.
    pub(crate) columns: Vec<ColumnMetadata>,
}

pub fn decode_table(item: ItemStruct) -> Result<TableMetadata> {
    let Fields::Named(fields) = &item.fields else {
        return Err(Error::new_spanned(
            &item.ident,
            "Entity can only be derived for structs with named fields",
        ));
    };
    let columns = fields
        .named
        .iter()
        .map(decode_column)
        .filter(|v| !matches!(v, Ok(ColumnMetadata { skip: true, .. })))
        .collect::<Result<Vec<_>>>()?;
    let mut name = item.ident.to_string().to_case(Case::Snake);
    let mut default = false;
    if name.starts_with('_') {
        name.remove(0);
    }
    for attr in &item.attrs {
        if !attr.path().is_ident("strata") {
            continue;
        }
        attr.parse_nested_meta(|arg| {
            if arg.path.is_ident("table") {
                let value: LitStr = arg.value()?.parse().map_err(|_| {
                    arg.error("Error while parsing `table`, use it like: `#[strata(table = \"my_table\")]`")
                })?;
                name = value.value();
            } else if arg.path.is_ident("default") {
                expect_flag(&arg, "default")?;
                default = true;
            } else {
                return Err(arg.error(format!(
                    "Unknown attribute `{}` inside strata macro",
                    arg.path
                        .get_ident()
                        .map(ToString::to_string)
                        .unwrap_or_default()
                )));
            }
            Ok(())
        })?;
    }
    Ok(TableMetadata {
        item,
        name,
        default,
        columns,
    })
}
