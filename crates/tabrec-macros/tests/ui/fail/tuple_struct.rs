use tabrec::Record;

#[derive(Record)]
struct Pair(i32, String);

fn main() {
    let _ = Pair(1, "a".to_string());
}
