use anyhow::Context;
use clap::{Parser, Subcommand};
use latexbuild_core::assertions::{has_file_extension, is_system_binary};
use latexbuild_core::exec::Executor;
use latexbuild_core::transform::apply_recursively;
use latexbuild_core::utils::{
    list_filepaths_with_predicate, random_name_filepath, read_file, DEFAULT_RANDOM_LENGTH,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "latexbuild")]
#[command(about = "latexbuild CLI tools", long_about = None)]
struct Cli {
    /// PATH-style list of directories to resolve binaries from
    #[arg(long, global = true, value_name = "DIRS")]
    search_path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command in a working directory and print its output
    Run {
        /// Directory the command runs in
        #[arg(long, default_value = ".")]
        cwd: PathBuf,
        /// The binary followed by its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Check that a name resolves to an executable and print its location
    CheckBinary { name: String },
    /// Check that a file has the given extension (e.g. ".tex")
    CheckExt {
        path: PathBuf,
        #[arg(allow_hyphen_values = true)]
        ext: String,
    },
    /// Print the path with random characters appended to its stem
    RandomName {
        path: PathBuf,
        #[arg(long, default_value_t = DEFAULT_RANDOM_LENGTH)]
        length: usize,
    },
    /// List files directly inside a directory whose names start with a prefix
    Find { dir: PathBuf, prefix: String },
    /// Convert README.md to README.rst with pandoc
    Readme {
        #[arg(long, default_value = "README.md")]
        input: PathBuf,
        #[arg(long, default_value = "README.rst")]
        output: PathBuf,
    },
    /// Append a suffix to every string leaf of a JSON file and print the result
    Transform {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        #[arg(long)]
        suffix: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut executor = Executor::new();
    if let Some(search_path) = &cli.search_path {
        executor = executor.with_search_path(search_path);
    }

    match &cli.command {
        Commands::Run { cwd, command } => {
            for line in executor.run(command, cwd)? {
                println!("{}", line);
            }
        }
        Commands::CheckBinary { name } => {
            let path = match &cli.search_path {
                Some(_) => executor.resolve(name, Path::new("."))?,
                None => is_system_binary(name)?,
            };
            println!("{}", path.display());
        }
        Commands::CheckExt { path, ext } => {
            has_file_extension(path, ext)?;
        }
        Commands::RandomName { path, length } => {
            println!("{}", random_name_filepath(path, *length)?.display());
        }
        Commands::Find { dir, prefix } => {
            for file in list_filepaths_with_predicate(dir, prefix)? {
                println!("{}", file.display());
            }
        }
        Commands::Readme { input, output } => {
            build_readme(&executor, input, output)?;
        }
        Commands::Transform { path, suffix } => {
            let value: Value = serde_json::from_str(&read_file(path)?)
                .with_context(|| format!("{} is not valid JSON", path.display()))?;
            let value = apply_recursively(value, |leaf| match leaf {
                Value::String(s) => Value::String(s + suffix),
                other => other,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

/// Renders `input` (markdown) as reStructuredText into `output`.
fn build_readme(executor: &Executor, input: &Path, output: &Path) -> anyhow::Result<()> {
    has_file_extension(input, ".md")?;
    let input = input
        .canonicalize()
        .with_context(|| format!("cannot find {}", input.display()))?;
    let dir = input.parent().unwrap_or_else(|| Path::new("."));

    let command = [
        "pandoc".to_string(),
        "--from=markdown".to_string(),
        "--to=rst".to_string(),
        input.to_string_lossy().to_string(),
    ];
    let lines = executor.run(&command, dir)?;

    let mut rst = lines.join("\n");
    rst.push('\n');
    fs::write(output, rst).with_context(|| format!("cannot write {}", output.display()))?;
    log::info!("Wrote {}", output.display());
    Ok(())
}
