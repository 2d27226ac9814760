use std::process;

fn main() {
    fintrack::init();
    process::exit(fintrack::cli::run_cli());
}
