//! The `wsgen` command-line binary.

fn main() {
    wsgen_cli::init_tracing();
    std::process::exit(wsgen_cli::run(std::env::args().collect()));
}
