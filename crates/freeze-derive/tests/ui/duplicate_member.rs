use freeze::Replicate;

#[allow(dead_code)]
#[derive(Replicate)]
struct Clash {
    #[freeze(rename = "b")]
    a: u8,
    b: u8,
}

fn main() {}
