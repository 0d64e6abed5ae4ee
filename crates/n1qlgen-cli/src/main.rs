fn main() {
    if let Err(e) = n1qlgen_cli::run(std::env::args().collect()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
