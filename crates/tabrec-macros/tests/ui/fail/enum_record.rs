use tabrec::Record;

#[derive(Record)]
enum Kind { A, B }

fn main() {
    let _ = (Kind::A, Kind::B);
}
