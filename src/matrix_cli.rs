// src/matrix_cli.rs
// Command-line front end: pick two matrix files and an operation, then show the result.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use log::{info, warn};

use crate::config::CalcConfig;
use crate::core::directory_location::DirectoryLocations;
use crate::core::result_output::{present_result, Presentation};
use crate::error::{CliError, MatrixError};
use crate::matrix::{read_matrix, Operation, SparseMatrix};

/// Entry point used by `main`
///
/// With no arguments the user is prompted for files and operation; with
/// `<a.txt> <b.txt> <operation>` the calculation runs directly.
pub fn run(args: &[String], config: &CalcConfig) -> Result<Presentation, CliError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), config);
    run_session(&mut session, args)
}

/// Dispatches on the argument count: none for prompts, three for a direct run
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session<R, W>,
    args: &[String],
) -> Result<Presentation, CliError> {
    match args {
        [] => session.run_interactive(),
        [a, b, operation] => {
            let operation: Operation = operation.parse()?;
            session.run_with_paths(Path::new(a), Path::new(b), operation)
        }
        _ => Err(CliError::Usage),
    }
}

/// One-line message for the user, prefixed by the kind of failure
pub fn describe_error(err: &CliError) -> String {
    match err {
        CliError::Matrix(e) if e.is_format_error() => format!("Invalid matrix file format: {}", e),
        CliError::Matrix(MatrixError::Io { .. })
        | CliError::MissingDirectory(_)
        | CliError::NoInputFiles(_)
        | CliError::Io { .. } => format!("File error: {}", err),
        _ => format!("Error: {}", err),
    }
}

/// One calculator run over a given input and output stream
pub struct Session<R, W> {
    input: R,
    output: W,
    locations: DirectoryLocations,
    console_limit: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: &CalcConfig) -> Self {
        Session {
            input,
            output,
            locations: DirectoryLocations::from_config(config),
            console_limit: config.console_limit,
        }
    }

    pub fn run_interactive(&mut self) -> Result<Presentation, CliError> {
        let files = self.locations.list_matrix_files()?;
        self.say("Available matrix files:")?;
        for (i, file) in files.iter().enumerate() {
            let name = file.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            self.say(&format!("{}. {}", i + 1, name))?;
        }

        self.say("\nSelect the first matrix file by number:")?;
        let a = &files[self.choose("Enter choice: ", files.len())?];
        let a = read_matrix(a)?;

        self.say("\nSelect the second matrix file by number:")?;
        let b = &files[self.choose("Enter choice: ", files.len())?];
        let b = read_matrix(b)?;

        self.say("\nSelect operation:")?;
        self.say("1. Add")?;
        self.say("2. Subtract")?;
        self.say("3. Multiply")?;
        let operation = Operation::ALL[self.choose("Enter your choice (1, 2, or 3): ", Operation::ALL.len())?];

        self.calculate(&a, &b, operation)
    }

    pub fn run_with_paths(&mut self, a: &Path, b: &Path, operation: Operation) -> Result<Presentation, CliError> {
        let a = read_matrix(a)?;
        let b = read_matrix(b)?;
        self.calculate(&a, &b, operation)
    }

    fn calculate(&mut self, a: &SparseMatrix, b: &SparseMatrix, operation: Operation) -> Result<Presentation, CliError> {
        self.say("\nCalculating...")?;
        let start = Instant::now();
        let result = operation.apply(a, b)?;
        let elapsed = start.elapsed();

        info!("{} finished in {:?} with {} non-zero entries", operation, elapsed, result.nnz());
        self.say(&format!("Calculation done in {:.2} seconds.", elapsed.as_secs_f64()))?;

        present_result(&result, operation, &self.locations, self.console_limit, &mut self.output)
    }

    /// Asks until the user enters a number in `1..=count`, returning it zero-based
    fn choose(&mut self, prompt: &str, count: usize) -> Result<usize, CliError> {
        loop {
            write!(self.output, "{}", prompt).map_err(CliError::Console)?;
            self.output.flush().map_err(CliError::Console)?;

            let mut line = String::new();
            if self.input.read_line(&mut line).map_err(CliError::Console)? == 0 {
                return Err(CliError::InputClosed);
            }
            let choice = line.trim();

            match choice.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => return Ok(n - 1),
                Ok(_) => {
                    warn!("Choice {} out of range 1..={}", choice, count);
                    self.say(&format!("Choice must be between 1 and {}.", count))?;
                }
                Err(_) => {
                    warn!("Rejected non-numeric choice {:?}", choice);
                    self.say("Please enter a valid number.")?;
                }
            }
        }
    }

    fn say(&mut self, message: &str) -> Result<(), CliError> {
        writeln!(self.output, "{}", message).map_err(CliError::Console)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
