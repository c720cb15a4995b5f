use tabrec::Record;

#[derive(Record)]
#[record(name = "latency")]
struct Latency {
	#[record(index = 1)]
	release: String,
	#[record(index = "0")]
	team: String,
	#[record(read_handler = "ms_to_s", write_handler = "s_to_ms")]
	tp90: f64,
	#[record(index = 3)]
	#[record(read_handler = "trim")]
	count: u32,
}

fn main() {
	let description = Latency::description();
	assert_eq!(description.name, "latency");
	assert_eq!(description.fields()[1].effective_index(), 0);
}
