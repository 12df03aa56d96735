fn main() {
    skald::cli::run();
}
