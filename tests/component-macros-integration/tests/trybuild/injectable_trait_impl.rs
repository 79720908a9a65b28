use component_macros::injectable;

pub struct Thing;

#[injectable]
impl Default for Thing {
    fn default() -> Self {
        Thing
    }
}

fn main() {
    let _ = Thing;
}
