use std::process;
use supercli::SuperCliError;

fn main() {
    if let Err(e) = supercli::cli::run() {
        // Help, version and usage errors are printed by clap with its own exit code.
        if let SuperCliError::Clap(clap_err) = &e {
            clap_err.exit();
        }
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
