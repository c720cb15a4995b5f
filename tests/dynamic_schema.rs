//! Runtime-declared record shapes and the global handler registry.

use std::fs;
use std::path::PathBuf;

use rstest::rstest;
use tabrec::{
	CodecSettings, DynamicRecord, FieldDescriptor, HandlerRegistry, RecordDescription,
	RecordReader, RecordWriter, TabrecError, Value, register_handler,
};
use tempfile::TempDir;

fn data(name: &str) -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

#[rstest]
fn test_toml_description_with_global_handler() {
	// Arrange
	register_handler("latency_ms_to_s", |s: &mut String| {
		if let Ok(ms) = s.parse::<f64>() {
			*s = (ms / 1000.0).to_string();
		}
	})
	.unwrap();
	let description = RecordDescription::from_toml_path(data("latency.toml")).unwrap();

	// Act
	let records = RecordReader::new()
		.skip_header(true)
		.read_dynamic(fs::File::open(data("latency.csv")).unwrap(), &description)
		.unwrap();

	// Assert
	assert_eq!(records.len(), 3);
	assert_eq!(
		records[1].get_named(&description, "tp90"),
		Some(&Value::Float64(1.5))
	);
	assert_eq!(
		records[2].values(),
		&[
			Value::Str("v1".to_string()),
			Value::Str("web".to_string()),
			Value::Float64(0.88),
			Value::Uint(17),
		]
	);
}

#[rstest]
fn test_global_registration_is_add_only() {
	// Arrange
	register_handler("dynamic_schema_suffix", |s: &mut String| s.push('!')).unwrap();

	// Act
	let again = register_handler("dynamic_schema_suffix", |s: &mut String| s.push('?'));

	// Assert
	assert!(matches!(again, Err(TabrecError::AlreadyExists(ref name)) if name == "dynamic_schema_suffix"));
	let handler = HandlerRegistry::global()
		.lookup("dynamic_schema_suffix")
		.unwrap();
	let mut text = "a".to_string();
	handler(&mut text);
	assert_eq!(text, "a!");
}

#[rstest]
fn test_unsupported_type_fails_every_call() {
	// Arrange
	let description = RecordDescription::from_toml_str(
		r#"
		name = "event"

		[[fields]]
		name = "id"
		type = "u32"

		[[fields]]
		name = "at"
		type = "DateTime"
		"#,
	)
	.unwrap();

	// Act
	let first = RecordReader::new().read_dynamic("1,x\n".as_bytes(), &description);
	let second = RecordReader::new().read_dynamic("".as_bytes(), &description);
	let write = RecordWriter::new().write_dynamic(Vec::new(), &description, &[]);

	// Assert
	for err in [first.unwrap_err(), second.unwrap_err(), write.unwrap_err()] {
		assert!(matches!(
			err,
			TabrecError::UnsupportedType { ref field, ref type_name, .. }
				if field == "at" && type_name == "DateTime"
		));
	}
}

#[rstest]
fn test_unsupported_type_wins_over_column_conflict() {
	// Arrange
	let description = RecordDescription::builder("mixed")
		.field_with(FieldDescriptor::new("a", "i32").with_index("0"))
		.field_with(FieldDescriptor::new("b", "i32").with_index("0"))
		.field("c", "Vec<u8>")
		.build();

	// Act
	let err = RecordReader::new()
		.read_dynamic("".as_bytes(), &description)
		.unwrap_err();

	// Assert
	assert!(matches!(err, TabrecError::UnsupportedType { .. }));
	assert!(err.is_schema_error());
}

#[rstest]
#[case::read(true)]
#[case::write(false)]
fn test_column_conflict_rejected(#[case] read: bool) {
	// Arrange
	let description = RecordDescription::builder("clash")
		.field("a", "String")
		.field_with(FieldDescriptor::new("b", "String").with_index("0"))
		.build();

	// Act
	let err = if read {
		RecordReader::new()
			.read_dynamic("x,y\n".as_bytes(), &description)
			.unwrap_err()
	} else {
		RecordWriter::new()
			.write_dynamic(Vec::new(), &description, &[])
			.unwrap_err()
	};

	// Assert
	assert!(matches!(
		err,
		TabrecError::ColumnConflict { ref field, ref other, index: 0 }
			if field == "b" && other == "a"
	));
}

#[rstest]
fn test_unknown_handler_is_ignored() {
	// Arrange
	let description = RecordDescription::builder("r")
		.field_with(FieldDescriptor::new("n", "i64").with_read_handler("never_registered"))
		.build();

	// Act
	let records = RecordReader::new()
		.read_dynamic("-3\n".as_bytes(), &description)
		.unwrap();

	// Assert
	assert_eq!(records, vec![DynamicRecord::new(vec![Value::Int(-3)])]);
}

#[rstest]
fn test_settings_from_toml_file() {
	// Arrange
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("codec.toml");
	fs::write(&path, "delimiter = \"|\"\ntrim = true\ncomment = \"#\"\n").unwrap();
	let description = RecordDescription::builder("pair")
		.field("k", "String")
		.field("v", "i16")
		.build();

	// Act
	let settings = CodecSettings::from_toml_path(&path).unwrap();
	let records = RecordReader::new()
		.with_settings(settings)
		.read_dynamic("# comment\n a | 1 \nb|-2\n".as_bytes(), &description)
		.unwrap();

	// Assert
	assert_eq!(records.len(), 2);
	assert_eq!(records[0].values(), &[Value::Str("a".to_string()), Value::Int(1)]);
	assert_eq!(records[1].get(1), Some(&Value::Int(-2)));
}
