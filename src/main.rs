// tinybc: Tiny BASIC to C transpiler

use std::fs;
use std::path::Path;
use std::process;

use tinybc::compile;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("tinybc");
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} <file.bas> [out.c]", program_name);
        eprintln!();
        eprintln!("Examples:");
        eprintln!(
            "  {} fibonacci.bas           # Translate to out.c",
            program_name
        );
        eprintln!(
            "  {} fibonacci.bas fib.c     # Translate to a chosen path",
            program_name
        );
        process::exit(1);
    }

    let input_file = &args[1];
    let output_file = args.get(2).map(|s| s.as_str()).unwrap_or("out.c");

    if !Path::new(input_file).exists() {
        eprintln!("Error: File '{}' not found", input_file);
        process::exit(1);
    }

    let source = match fs::read_to_string(input_file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Failed to read '{}': {}", input_file, e);
            process::exit(1);
        }
    };

    eprintln!("Compiling {}...", input_file);
    let c_code = match compile(&source) {
        Ok(c_code) => c_code,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = fs::write(output_file, c_code) {
        eprintln!("Error: Failed to write '{}': {}", output_file, e);
        process::exit(1);
    }
    eprintln!("Compiled successfully. Wrote {}.", output_file);
}
