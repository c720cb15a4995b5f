use tabrec::Record;

#[derive(Debug, Record)]
struct Point {
	x: i32,
	y: i32,
	label: String,
}

fn main() {
	let description = Point::description();
	assert_eq!(description.len(), 3);

	let point = Point { x: 1, y: 2, label: "a".to_string() };
	let values = point.to_values();
	let back = Point::from_values(values).unwrap();
	assert_eq!(back.label, "a");
}
