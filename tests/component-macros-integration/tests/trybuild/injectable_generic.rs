use component_macros::injectable;

pub struct Thing;

#[injectable]
impl<T> Thing {}

fn main() {
    let _ = Thing;
}
