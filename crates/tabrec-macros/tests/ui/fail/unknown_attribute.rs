use tabrec::Record;

#[derive(Record)]
struct Row {
    #[record(rename = "x")]
    id: i32,
}

fn main() {
    let row = Row { id: 1 };
    let _ = row.id;
}
