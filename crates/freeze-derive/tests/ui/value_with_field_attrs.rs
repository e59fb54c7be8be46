use freeze::Replicate;

#[allow(dead_code)]
#[derive(Clone, Replicate)]
#[freeze(value)]
struct Point {
    #[freeze(rename = "horizontal")]
    x: i32,
    y: i32,
}

fn main() {}
