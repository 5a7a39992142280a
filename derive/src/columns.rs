use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Result,
    parse::{Parse, ParseStream},
};

pub(crate) fn expand_columns(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`Columns` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`Columns` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::new();

    for field in &fields {
        if let ColumnAttribute::Named(column) = &field.column {
            if !seen.insert(column.value()) {
                Err(Error::new_spanned(column, "Column names must be unique."))?
            }
        }
    }

    let visits = fields.iter().map(|field| {
        let FieldMetadata { name, column } = field;

        match column {
            ColumnAttribute::Named(column) => quote! {
                visit(#column, &self.#name);
            },
            ColumnAttribute::Flatten => quote! {
                ::tobin_bas::Columns::visit_columns(&self.#name, visit);
            },
        }
    });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::tobin_bas::Columns for #name #ty_generics #where_clause {
            fn visit_columns(
                &self,
                visit: &mut dyn FnMut(&'static str, &dyn ::core::fmt::Display),
            ) {
                #(#visits)*
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    column: ColumnAttribute,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let Some(name) = field.ident.clone() else {
            Err(Error::new_spanned(field, "Field must be named."))?
        };

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("column")) else {
            return Ok(None);
        };

        let column = attr.meta.require_list()?.parse_args()?;

        Ok(Some(Self { name, column }))
    }
}

#[derive(Debug)]
enum ColumnAttribute {
    Named(LitStr),
    Flatten,
}

impl Parse for ColumnAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(LitStr) {
            return Ok(Self::Named(input.parse()?));
        }

        let ident = input.parse::<Ident>()?;

        if ident == "flatten" {
            Ok(Self::Flatten)
        } else {
            Err(Error::new_spanned(
                ident,
                "Column attribute must be a string literal or `flatten`.",
            ))
        }
    }
}
