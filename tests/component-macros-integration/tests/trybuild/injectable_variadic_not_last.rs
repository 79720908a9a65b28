use component_macros::injectable;

pub struct Bag;

#[injectable]
impl Bag {
    pub fn new(#[variadic] tags: Vec<Value>, size: i64) -> Self {
        Bag
    }
}

fn main() {
    let _ = Bag;
}
