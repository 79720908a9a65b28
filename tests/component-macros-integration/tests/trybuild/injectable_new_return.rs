use component_macros::injectable;

pub struct Counter;

#[injectable]
impl Counter {
    pub fn new() -> i64 {
        0
    }
}

fn main() {
    let _ = Counter;
}
