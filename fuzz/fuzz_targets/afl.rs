#[macro_use]
extern crate afl;

fn main() {
    fuzz!(|data: &[u8]| {
        traverse_fuzz::test(data);
    });
}
