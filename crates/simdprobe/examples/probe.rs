//! Print what the running processor supports, then enforce the extensions
//! named on the command line.
//!
//! ```text
//! cargo run -p simdprobe --example probe -- avx512
//! ```
//!
//! Exits with status 1 if a requested extension is unavailable and 2 on an
//! unknown extension name.

use std::process::ExitCode;

use simdprobe::{Extension, Extensions};

fn main() -> ExitCode {
  for ext in Extension::ALL {
    println!("{:<8} {}", ext.name(), simdprobe::explain(ext));
  }
  println!("available: {}", Extensions::probe());

  let mut status = ExitCode::SUCCESS;
  for arg in std::env::args().skip(1) {
    let ext = match arg.parse::<Extension>() {
      Ok(ext) => ext,
      Err(err) => {
        eprintln!("{arg}: {err}");
        return ExitCode::from(2);
      }
    };

    match simdprobe::require(ext) {
      Ok(()) => println!("{ext}: using {}-bit path", ext.register_bits()),
      Err(err) => {
        eprintln!("{err}");
        status = ExitCode::FAILURE;
      }
    }
  }
  status
}
