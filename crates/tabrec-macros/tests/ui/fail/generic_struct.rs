use tabrec::Record;

#[derive(Record)]
struct Wrapper<T> {
    value: T,
}

fn main() {
    let wrapper = Wrapper { value: 1 };
    let _ = wrapper.value;
}
