use crate::{decode_column::ColumnMetadata, decode_table::TableMetadata};
use proc_macro2::TokenStream;
use quote::quote;

fn unsupported(column: &ColumnMetadata) -> TokenStream {
    let field = column.ident.to_string();
    let type_name = &column.type_name;
    quote! {
        Err(::strata::Error::UnsupportedType {
            field: #field.into(),
            type_name: #type_name.into(),
        })
    }
}

pub(crate) fn field_defs(table: &TableMetadata) -> impl Iterator<Item = TokenStream> {
    table.columns.iter().map(|c| {
        let name = &c.name;
        let field = c.ident.to_string();
        let type_name = &c.type_name;
        let declared = &c.declared;
        let primary_key = c.primary_key;
        let not_null = c.not_null;
        quote! {
            ::strata::FieldDef {
                name: #name,
                field: #field,
                type_name: #type_name,
                declared: #declared,
                primary_key: #primary_key,
                not_null: #not_null,
            }
        }
    })
}

pub(crate) fn getters(table: &TableMetadata) -> impl Iterator<Item = TokenStream> {
    table.columns.iter().enumerate().map(|(i, c)| {
        let ident = &c.ident;
        let name = &c.name;
        let body = if c.supported {
            quote! {
                ::strata::AsValue::as_value(::std::clone::Clone::clone(&self.#ident))
                    .map_err(|e| e.for_field(#name))
            }
        } else {
            unsupported(c)
        };
        quote!(#i => #body)
    })
}

pub(crate) fn setters(table: &TableMetadata) -> impl Iterator<Item = TokenStream> {
    table.columns.iter().enumerate().map(|(i, c)| {
        let ident = &c.ident;
        let name = &c.name;
        let body = if c.supported {
            quote! {{
                self.#ident = ::strata::AsValue::try_from_value(value)
                    .map_err(|e| e.for_field(#name))?;
                Ok(())
            }}
        } else {
            unsupported(c)
        };
        quote!(#i => #body)
    })
}
