use tabrec::Record;

#[derive(Record)]
struct Keywords {
	r#type: String,
	r#match: bool,
}

fn main() {
	let names = Keywords::description().field_names();
	assert_eq!(names, vec!["type", "match"]);
}
