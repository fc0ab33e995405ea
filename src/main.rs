fn main() {
    slidegen::app::cli::run();
}
