//! Attribute parsing for `#[record(...)]`.

use syn::{
	Attribute, Error, Ident, Lit, Result, Token,
	parse::{Parse, ParseStream},
	punctuated::Punctuated,
};

/// Parsed attributes from a field's `#[record(...)]`.
#[derive(Debug, Clone, Default)]
pub(crate) struct FieldAttrs {
	/// Column index override, kept as text
	pub(crate) index: Option<String>,
	/// Read handler name
	pub(crate) read_handler: Option<String>,
	/// Write handler name
	pub(crate) write_handler: Option<String>,
}

impl FieldAttrs {
	/// Merges another `#[record(...)]` on the same field into this one.
	pub(crate) fn merge(&mut self, other: FieldAttrs, attr: &Attribute) -> Result<()> {
		merge_slot(&mut self.index, other.index, "index", attr)?;
		merge_slot(&mut self.read_handler, other.read_handler, "read_handler", attr)?;
		merge_slot(&mut self.write_handler, other.write_handler, "write_handler", attr)?;
		Ok(())
	}
}

impl Parse for FieldAttrs {
	fn parse(input: ParseStream) -> Result<Self> {
		let attrs = Punctuated::<RecordAttr, Token![,]>::parse_terminated(input)?;

		let mut result = Self::default();

		for attr in attrs {
			let (name, value) = attr.into_name_value()?;
			let slot = match name.to_string().as_str() {
				"index" => &mut result.index,
				"read_handler" => &mut result.read_handler,
				"write_handler" => &mut result.write_handler,
				_ => {
					return Err(Error::new(
						name.span(),
						format!("unknown attribute `{}`", name),
					));
				}
			};
			if slot.is_some() {
				return Err(Error::new(
					name.span(),
					format!("duplicate `{}` attribute", name),
				));
			}
			*slot = Some(lit_to_string(&value)?);
		}

		Ok(result)
	}
}

/// Parsed attributes from the struct's `#[record(...)]`.
#[derive(Debug, Clone, Default)]
pub(crate) struct StructAttrs {
	/// Record name used in error messages; defaults to the struct name
	pub(crate) name: Option<String>,
}

impl Parse for StructAttrs {
	fn parse(input: ParseStream) -> Result<Self> {
		let attrs = Punctuated::<RecordAttr, Token![,]>::parse_terminated(input)?;

		let mut result = Self::default();

		for attr in attrs {
			let (name, value) = attr.into_name_value()?;
			match name.to_string().as_str() {
				"name" => {
					if result.name.is_some() {
						return Err(Error::new(name.span(), "duplicate `name` attribute"));
					}
					result.name = Some(lit_to_string(&value)?);
				}
				_ => {
					return Err(Error::new(
						name.span(),
						format!("unknown attribute `{}`", name),
					));
				}
			}
		}

		Ok(result)
	}
}

/// Single attribute: either a flag or a name-value pair.
enum RecordAttr {
	/// Flag attribute (not accepted by `#[record]`)
	Flag(Ident),
	/// Name-value attribute (e.g., `index = 1`)
	NameValue { name: Ident, value: Lit },
}

impl RecordAttr {
	fn into_name_value(self) -> Result<(Ident, Lit)> {
		match self {
			RecordAttr::NameValue { name, value } => Ok((name, value)),
			RecordAttr::Flag(name) => Err(Error::new(
				name.span(),
				format!("unknown flag attribute `{}`, expected `name = value`", name),
			)),
		}
	}
}

impl Parse for RecordAttr {
	fn parse(input: ParseStream) -> Result<Self> {
		let name: Ident = input.parse()?;

		if input.peek(Token![=]) {
			let _eq: Token![=] = input.parse()?;
			let value: Lit = input.parse()?;
			Ok(RecordAttr::NameValue { name, value })
		} else {
			Ok(RecordAttr::Flag(name))
		}
	}
}

fn merge_slot(
	slot: &mut Option<String>,
	other: Option<String>,
	name: &str,
	attr: &Attribute,
) -> Result<()> {
	if let Some(value) = other {
		if slot.is_some() {
			return Err(Error::new_spanned(
				attr,
				format!("duplicate `{}` attribute", name),
			));
		}
		*slot = Some(value);
	}
	Ok(())
}

/// Convert a literal to a string.
fn lit_to_string(lit: &Lit) -> Result<String> {
	match lit {
		Lit::Str(s) => Ok(s.value()),
		Lit::Int(i) => Ok(i.base10_digits().to_string()),
		_ => Err(Error::new(
			lit.span(),
			"expected a string or integer literal",
		)),
	}
}
