#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

fn main() {
    intimations::run();
}
