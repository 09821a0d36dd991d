mod decode_column;
mod decode_table;
mod reflect;

use decode_table::{TableMetadata, decode_table};
use proc_macro::TokenStream;
use quote::quote;
use reflect::{field_defs, getters, setters};
use syn::{ItemStruct, parse_macro_input};

/// Derives `Entity`: a static table of the struct's fields plus indexed
/// getters and setters.
///
/// Fields whose type has no column mapping still compile, the schema of the
/// entity then fails to build with `UnsupportedType`. Mark such fields with
/// `#[strata(skip)]` to leave them out.
#[proc_macro_derive(Entity, attributes(strata))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemStruct);
    match decode_table(item) {
        Ok(table) => entity_impl(&table),
        Err(e) => e.to_compile_error(),
    }
    .into()
}

fn entity_impl(table: &TableMetadata) -> proc_macro2::TokenStream {
    let item = &table.item;
    let name = &item.ident;
    let entity_name = name.to_string();
    let table_name = &table.name;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let field_defs = field_defs(table);
    let getters = getters(table);
    let setters = setters(table);
    let has_default = table.default.then(|| {
        quote! {
            impl #impl_generics ::strata::HasDefault for #name #ty_generics #where_clause {
                fn make_default() -> Self {
                    ::std::default::Default::default()
                }
            }
        }
    });
    quote! {
        #has_default
        impl #impl_generics ::strata::Entity for #name #ty_generics #where_clause {
            fn table_name() -> &'static str {
                #table_name
            }

            fn fields() -> &'static [::strata::FieldDef] {
                static RESULT: ::std::sync::LazyLock<Box<[::strata::FieldDef]>> =
                    ::std::sync::LazyLock::new(|| vec![#(#field_defs),*].into_boxed_slice());
                &RESULT
            }

            fn field_value(&self, index: usize) -> ::strata::Result<::strata::Value> {
                match index {
                    #(#getters,)*
                    _ => Err(::strata::Error::FieldIndex {
                        entity: #entity_name,
                        index,
                    }),
                }
            }

            #[allow(unused_variables)]
            fn set_field_value(
                &mut self,
                index: usize,
                value: ::strata::Value,
            ) -> ::strata::Result<()> {
                match index {
                    #(#setters,)*
                    _ => Err(::strata::Error::FieldIndex {
                        entity: #entity_name,
                        index,
                    }),
                }
            }
        }
    }
}
