use strata_core::{DeclaredType, decode_type, map_type, type_text};
use syn::{Field, Ident, LitStr, Result, Token, ext::IdentExt, meta::ParseNestedMeta, spanned::Spanned};

pub(crate) struct ColumnMetadata {
    pub(crate) ident: Ident,
    pub(crate) name: String,
    pub(crate) type_name: String,
    pub(crate) declared: DeclaredType,
    pub(crate) supported: bool,
    pub(crate) primary_key: bool,
    pub(crate) not_null: bool,
    pub(crate) skip: bool,
}

pub(crate) fn expect_flag(arg: &ParseNestedMeta, name: &str) -> Result<()> {
    if arg.input.peek(Token![=]) {
        return Err(arg.error(format!(
            "Error while parsing `{name}`, use it like: `#[strata({name})]`"
        )));
    }
    Ok(())
}

pub fn decode_column(field: &Field) -> Result<ColumnMetadata> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new(field.span(), "Field is expected to have a name"))?;
    let declared = decode_type(&field.ty);
    let mut metadata = ColumnMetadata {
        name: ident.unraw().to_string(),
        ident,
        type_name: type_text(&field.ty),
        supported: map_type(&declared).is_some(),
        declared,
        primary_key: false,
        not_null: false,
        skip: false,
    };
    if metadata.name.starts_with('_') {
        metadata.name.remove(0);
    }
    for attr in &field.attrs {
        if !attr.path().is_ident("strata") {
            continue;
        }
        attr.parse_nested_meta(|arg| {
            if arg.path.is_ident("name") {
                let value: LitStr = arg.value()?.parse().map_err(|_| {
                    arg.error("Error while parsing `name`, use it like: `#[strata(name = \"my_column\")]`")
                })?;
                metadata.name = value.value();
            } else if arg.path.is_ident("primary_key") {
                expect_flag(&arg, "primary_key")?;
                metadata.primary_key = true;
            } else if arg.path.is_ident("not_null") {
                expect_flag(&arg, "not_null")?;
                metadata.not_null = true;
            } else if arg.path.is_ident("skip") {
                expect_flag(&arg, "skip")?;
                metadata.skip = true;
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
    Ok(metadata)
}
