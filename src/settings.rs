//! Delimited-row codec settings.
//!
//! Defaults match RFC 4180 with `\n` line endings on write. Settings can be
//! loaded from TOML:
//!
//! ```toml
//! delimiter = ";"
//! trim = true
//! terminator = "crlf"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TabrecError, TabrecResult};

/// Line terminator used when writing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
	/// `\n`
	#[default]
	Lf,
	/// `\r\n`
	Crlf,
}

/// Settings applied to the underlying row reader and writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecSettings {
	/// Field delimiter. Must be ASCII.
	pub delimiter: char,
	/// Quote character. Must be ASCII.
	pub quote: char,
	/// Accept rows whose cell count differs from the first row's. Read only.
	pub flexible: bool,
	/// Trim surrounding whitespace from cells on read.
	pub trim: bool,
	/// Lines starting with this character are skipped on read.
	pub comment: Option<char>,
	/// Line terminator on write. Reading accepts `\n`, `\r` and `\r\n`.
	pub terminator: LineTerminator,
}

impl Default for CodecSettings {
	fn default() -> Self {
		Self {
			delimiter: ',',
			quote: '"',
			flexible: false,
			trim: false,
			comment: None,
			terminator: LineTerminator::Lf,
		}
	}
}

impl CodecSettings {
	/// Creates default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the delimiter.
	pub fn with_delimiter(mut self, delimiter: char) -> Self {
		self.delimiter = delimiter;
		self
	}

	/// Sets the quote character.
	pub fn with_quote(mut self, quote: char) -> Self {
		self.quote = quote;
		self
	}

	/// Sets whether ragged rows are accepted.
	pub fn with_flexible(mut self, flexible: bool) -> Self {
		self.flexible = flexible;
		self
	}

	/// Sets whether cells are trimmed on read.
	pub fn with_trim(mut self, trim: bool) -> Self {
		self.trim = trim;
		self
	}

	/// Sets the comment character.
	pub fn with_comment(mut self, comment: Option<char>) -> Self {
		self.comment = comment;
		self
	}

	/// Sets the line terminator used on write.
	pub fn with_terminator(mut self, terminator: LineTerminator) -> Self {
		self.terminator = terminator;
		self
	}

	/// Parses settings from TOML. Missing keys keep their defaults.
	pub fn from_toml_str(content: &str) -> TabrecResult<Self> {
		let settings: Self = toml::from_str(content)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Loads settings from a TOML file.
	pub fn from_toml_path(path: impl AsRef<Path>) -> TabrecResult<Self> {
		let content = std::fs::read_to_string(path)?;
		Self::from_toml_str(&content)
	}

	/// Checks that every special character is a single ASCII byte.
	pub fn validate(&self) -> TabrecResult<()> {
		ascii_byte("delimiter", self.delimiter)?;
		ascii_byte("quote", self.quote)?;
		if let Some(comment) = self.comment {
			ascii_byte("comment", comment)?;
		}
		Ok(())
	}

	pub(crate) fn reader_builder(&self) -> TabrecResult<csv::ReaderBuilder> {
		let mut builder = csv::ReaderBuilder::new();
		builder
			.has_headers(false)
			.delimiter(ascii_byte("delimiter", self.delimiter)?)
			.quote(ascii_byte("quote", self.quote)?)
			.flexible(self.flexible)
			.trim(if self.trim {
				csv::Trim::All
			} else {
				csv::Trim::None
			});
		if let Some(comment) = self.comment {
			builder.comment(Some(ascii_byte("comment", comment)?));
		}
		Ok(builder)
	}

	pub(crate) fn writer_builder(&self) -> TabrecResult<csv::WriterBuilder> {
		let mut builder = csv::WriterBuilder::new();
		builder
			.has_headers(false)
			.delimiter(ascii_byte("delimiter", self.delimiter)?)
			.quote(ascii_byte("quote", self.quote)?)
			// Data rows are always as wide as the record; only a header may differ.
			.flexible(true)
			.terminator(match self.terminator {
				LineTerminator::Lf => csv::Terminator::Any(b'\n'),
				LineTerminator::Crlf => csv::Terminator::CRLF,
			});
		Ok(builder)
	}
}

fn ascii_byte(name: &str, c: char) -> TabrecResult<u8> {
	if c.is_ascii() {
		Ok(c as u8)
	} else {
		Err(TabrecError::InvalidArgument(format!(
			"{} must be a single ASCII character, got {:?}",
			name, c
		)))
	}
}
