//! Implementation of `#[derive(Record)]`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, parse_macro_input};
use syn::ext::IdentExt;

use crate::attr_parser::{FieldAttrs, StructAttrs};

pub(crate) fn record_derive_impl(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);

	match expand(&input) {
		Ok(tokens) => tokens.into(),
		Err(err) => err.to_compile_error().into(),
	}
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
	let struct_name = &input.ident;

	if !input.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(
			&input.generics,
			"#[derive(Record)] does not support generic structs",
		));
	}

	let fields = match &input.data {
		Data::Struct(data) => match &data.fields {
			Fields::Named(fields) => &fields.named,
			_ => {
				return Err(syn::Error::new_spanned(
					input,
					"#[derive(Record)] only supports structs with named fields",
				));
			}
		},
		_ => {
			return Err(syn::Error::new_spanned(
				input,
				"#[derive(Record)] only supports structs",
			));
		}
	};

	let record_name = struct_attrs(&input.attrs)?
		.name
		.unwrap_or_else(|| struct_name.to_string());

	let mut descriptors = Vec::with_capacity(fields.len());
	let mut takes = Vec::with_capacity(fields.len());
	let mut idents = Vec::with_capacity(fields.len());

	for field in fields {
		let Some(ident) = field.ident.as_ref() else {
			return Err(syn::Error::new_spanned(field, "expected a named field"));
		};
		let ty = &field.ty;
		let name = ident.unraw().to_string();
		let attrs = field_attrs(&field.attrs)?;

		let index = attrs.index.map(|i| quote! { .with_index(#i) });
		let read_handler = attrs
			.read_handler
			.map(|h| quote! { .with_read_handler(#h) });
		let write_handler = attrs
			.write_handler
			.map(|h| quote! { .with_write_handler(#h) });

		descriptors.push(quote! {
			.field_with(
				::tabrec::FieldDescriptor::new(
					#name,
					<#ty as ::tabrec::FieldValue>::TYPE_NAME,
				)
				#index
				#read_handler
				#write_handler
			)
		});
		takes.push(quote! {
			#ident: ::tabrec::record::__private::take_field::<#ty, _>(
				&mut values,
				#record_name,
				#name,
			)?
		});
		idents.push(ident);
	}

	let field_count = fields.len();

	Ok(quote! {
		#[automatically_derived]
		impl ::tabrec::Record for #struct_name {
			fn description() -> &'static ::tabrec::RecordDescription {
				static DESCRIPTION: ::tabrec::record::__private::OnceLock<
					::tabrec::RecordDescription,
				> = ::tabrec::record::__private::OnceLock::new();
				DESCRIPTION.get_or_init(|| {
					::tabrec::RecordDescription::builder(#record_name)
						#(#descriptors)*
						.build()
				})
			}

			fn from_values(
				values: ::std::vec::Vec<::tabrec::Value>,
			) -> ::tabrec::TabrecResult<Self> {
				::tabrec::record::__private::expect_len(#record_name, #field_count, &values)?;
				#[allow(unused_mut, unused_variables)]
				let mut values = ::std::iter::IntoIterator::into_iter(values);
				::std::result::Result::Ok(Self {
					#(#takes,)*
				})
			}

			fn to_values(&self) -> ::std::vec::Vec<::tabrec::Value> {
				::std::vec![
					#(::tabrec::FieldValue::to_value(&self.#idents),)*
				]
			}
		}
	})
}

fn struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
	let mut result = StructAttrs::default();
	for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
		let parsed: StructAttrs = attr.parse_args()?;
		if let Some(name) = parsed.name {
			if result.name.is_some() {
				return Err(syn::Error::new_spanned(attr, "duplicate `name` attribute"));
			}
			result.name = Some(name);
		}
	}
	Ok(result)
}

fn field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
	let mut result = FieldAttrs::default();
	for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
		let parsed: FieldAttrs = attr.parse_args()?;
		result.merge(parsed, attr)?;
	}
	Ok(result)
}
