use crate::{SqlType, matches_path};
use proc_macro2::TokenStream;
use quote::{ToTokens, TokenStreamExt, quote};
use std::borrow::Cow;
use syn::{GenericArgument, PathArguments, Type, TypePath, TypeSlice};

/// Field type as written in the entity declaration, decoded at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Isize,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Usize,
    Float32,
    Float64,
    Char,
    String,
    /// `Vec<u8>` or `Box<[u8]>`.
    Bytes,
    Date,
    Time,
    Timestamp,
    TimestampWithTimezone,
    Uuid,
    Option(Box<DeclaredType>),
    List(Box<DeclaredType>),
    /// Anything else, with the type as written.
    Unsupported(Cow<'static, str>),
}

/// Maps a declared type to its column type and nullability.
///
/// `None` means the type has no column representation: nested aggregates,
/// collections other than bytes, doubly optional values.
pub fn map_type(declared: &DeclaredType) -> Option<(SqlType, bool)> {
    use DeclaredType::*;
    Some(match declared {
        Bool | Int8 | Int16 | Int32 | Int64 | Isize | UInt8 | UInt16 | UInt32 | UInt64
        | Usize => (SqlType::Integer, false),
        Float32 | Float64 => (SqlType::Real, false),
        Char | String => (SqlType::Text, false),
        Bytes => (SqlType::Blob, false),
        Date | Time | Timestamp | TimestampWithTimezone | Uuid => (SqlType::Text, false),
        Option(inner) => match inner.as_ref() {
            Option(..) => return None,
            inner => (map_type(inner)?.0, true),
        },
        List(..) | Unsupported(..) => return None,
    })
}

fn first_generic(path: &syn::Path) -> Option<&Type> {
    let PathArguments::AngleBracketed(arguments) = &path.segments.last()?.arguments else {
        return None;
    };
    arguments.args.iter().find_map(|v| match v {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

fn is_u8(ty: &Type) -> bool {
    matches!(ty, Type::Path(TypePath { path, .. }) if path.is_ident("u8"))
}

/// Decodes a field type, types with no known shape become `Unsupported`.
pub fn decode_type(ty: &Type) -> DeclaredType {
    decode_type_inner(ty).unwrap_or_else(|| DeclaredType::Unsupported(type_text(ty).into()))
}

/// Type as written, without the spaces `quote` puts between tokens.
pub fn type_text(ty: &Type) -> String {
    ty.to_token_stream().to_string().replace(' ', "")
}

fn decode_type_inner(ty: &Type) -> Option<DeclaredType> {
    let Type::Path(TypePath { path, qself: None }) = ty else {
        return None;
    };
    if let Some(ident) = path.get_ident() {
        let decoded = match ident.to_string().as_str() {
            "bool" => Some(DeclaredType::Bool),
            "i8" => Some(DeclaredType::Int8),
            "i16" => Some(DeclaredType::Int16),
            "i32" => Some(DeclaredType::Int32),
            "i64" => Some(DeclaredType::Int64),
            "isize" => Some(DeclaredType::Isize),
            "u8" => Some(DeclaredType::UInt8),
            "u16" => Some(DeclaredType::UInt16),
            "u32" => Some(DeclaredType::UInt32),
            "u64" => Some(DeclaredType::UInt64),
            "usize" => Some(DeclaredType::Usize),
            "f32" => Some(DeclaredType::Float32),
            "f64" => Some(DeclaredType::Float64),
            "char" => Some(DeclaredType::Char),
            _ => None,
        };
        if decoded.is_some() {
            return decoded;
        }
    }
    Some(if matches_path(path, &["std", "string", "String"]) {
        DeclaredType::String
    } else if matches_path(path, &["time", "Date"]) {
        DeclaredType::Date
    } else if matches_path(path, &["time", "Time"]) {
        DeclaredType::Time
    } else if matches_path(path, &["time", "PrimitiveDateTime"]) {
        DeclaredType::Timestamp
    } else if matches_path(path, &["time", "OffsetDateTime"]) {
        DeclaredType::TimestampWithTimezone
    } else if matches_path(path, &["uuid", "Uuid"]) {
        DeclaredType::Uuid
    } else if matches_path(path, &["std", "option", "Option"]) {
        DeclaredType::Option(Box::new(decode_type_inner(first_generic(path)?)?))
    } else if matches_path(path, &["std", "vec", "Vec"]) {
        let inner = first_generic(path)?;
        if is_u8(inner) {
            DeclaredType::Bytes
        } else {
            DeclaredType::List(Box::new(decode_type_inner(inner)?))
        }
    } else if matches_path(path, &["std", "boxed", "Box"]) {
        match first_generic(path)? {
            Type::Slice(TypeSlice { elem, .. }) if is_u8(elem) => DeclaredType::Bytes,
            _ => return None,
        }
    } else {
        return None;
    })
}

impl ToTokens for DeclaredType {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        use DeclaredType::*;
        tokens.append_all(match self {
            Bool => quote!(::strata::DeclaredType::Bool),
            Int8 => quote!(::strata::DeclaredType::Int8),
            Int16 => quote!(::strata::DeclaredType::Int16),
            Int32 => quote!(::strata::DeclaredType::Int32),
            Int64 => quote!(::strata::DeclaredType::Int64),
            Isize => quote!(::strata::DeclaredType::Isize),
            UInt8 => quote!(::strata::DeclaredType::UInt8),
            UInt16 => quote!(::strata::DeclaredType::UInt16),
            UInt32 => quote!(::strata::DeclaredType::UInt32),
            UInt64 => quote!(::strata::DeclaredType::UInt64),
            Usize => quote!(::strata::DeclaredType::Usize),
            Float32 => quote!(::strata::DeclaredType::Float32),
            Float64 => quote!(::strata::DeclaredType::Float64),
            Char => quote!(::strata::DeclaredType::Char),
            String => quote!(::strata::DeclaredType::String),
            Bytes => quote!(::strata::DeclaredType::Bytes),
            Date => quote!(::strata::DeclaredType::Date),
            Time => quote!(::strata::DeclaredType::Time),
            Timestamp => quote!(::strata::DeclaredType::Timestamp),
            TimestampWithTimezone => quote!(::strata::DeclaredType::TimestampWithTimezone),
            Uuid => quote!(::strata::DeclaredType::Uuid),
            Option(inner) => quote!(::strata::DeclaredType::Option(::std::boxed::Box::new(#inner))),
            List(inner) => quote!(::strata::DeclaredType::List(::std::boxed::Box::new(#inner))),
            Unsupported(text) => {
                let text = text.as_ref();
                quote!(::strata::DeclaredType::Unsupported(::std::borrow::Cow::Borrowed(#text)))
            }
        });
    }
}
