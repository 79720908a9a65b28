use component_macros::injectable;

pub struct Counter;

#[injectable]
impl Counter {
    pub fn new(start: u32) -> Self {
        Counter
    }
}

fn main() {
    let _ = Counter;
}
