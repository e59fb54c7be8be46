use freeze::Replicate;

#[allow(dead_code)]
#[derive(Replicate)]
struct Retry {
    #[freeze(default = "3")]
    attempts: u8,
}

fn main() {}
