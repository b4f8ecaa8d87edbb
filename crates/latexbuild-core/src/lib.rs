//! # latexbuild Core
//!
//! Support library for driving LaTeX toolchains.
//!
//! ## Overview
//!
//! The centrepiece is [`exec::check_output_cwd`], which runs an external
//! program (pdflatex, latexmk, biber, pandoc, ...) in a chosen working
//! directory. The program is resolved on the search path first, so a missing
//! toolchain is reported as [`Error::InvalidBinary`] without spawning
//! anything, while a program that runs and fails is reported as
//! [`Error::ProcessExecution`] with its exit code and captured output.
//!
//! Around it sit small, stateless helpers.
//!
//! ## Modules
//!
//! - [`assertions`] - Argument checks: file extensions, system binaries, list element types
//! - [`exec`] - Validated command execution
//! - [`utils`] - Randomized file names, prefix-based file listing, file reading
//! - [`transform`] - Recursive leaf transformation of nested data
//! - [`error`] - The shared [`Error`] type
//!
//! ## Examples
//!
//! ```no_run
//! use latexbuild_core::{check_output_cwd, Error};
//!
//! match check_output_cwd(&["pdflatex", "-interaction=nonstopmode", "main.tex"], "paper") {
//!     Ok(lines) => println!("{}", lines.join("\n")),
//!     Err(Error::InvalidBinary { name }) => eprintln!("{} is not installed", name),
//!     Err(Error::ProcessExecution { code, stdout, .. }) => {
//!         eprintln!("pdflatex exited with {:?}\n{}", code, stdout)
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```
//!
//! ```
//! use latexbuild_core::utils::random_name_filepath;
//!
//! let scratch = random_name_filepath("build/main.tex", 5)?;
//! assert_eq!(scratch.extension().unwrap(), "tex");
//! # Ok::<(), latexbuild_core::Error>(())
//! ```

pub mod assertions;
pub mod error;
pub mod exec;
pub mod transform;
pub mod utils;

pub use error::{Error, Result};
pub use exec::{check_output_cwd, Executor};
