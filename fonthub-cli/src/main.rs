//! Binary entrypoint for fonthub

fn main() {
    if let Err(err) = fonthub_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
