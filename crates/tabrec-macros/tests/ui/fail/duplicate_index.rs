use tabrec::Record;

#[derive(Record)]
struct Row {
    #[record(index = 1)]
    #[record(index = 2)]
    id: i32,
}

fn main() {
    let row = Row { id: 1 };
    let _ = row.id;
}
