//! assemblyzero CLI binary.
//!
//! This is the minimal entrypoint; all logic lives in the library. `main`
//! only maps the returned exit code to a process exit status.

fn main() {
    if let Err(code) = assemblyzero::cli::run() {
        std::process::exit(code.as_i32());
    }
}
