use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            traverse_fuzz::test(data);
        });
    }
}
