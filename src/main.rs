// hedge: front end and inspector for a language of certain and uncertain statements

use std::fs;
use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use hedge::diagnostics::Diagnostic;
use hedge::parser::lexer::scan;
use hedge::parser::outline::{outline, render_outline, token_lines};
use hedge::parser::parse::{ParseError, Parser};
use hedge::ui::App;

/// What to do with the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Inspect,
    Tokens,
    Ast,
}

fn usage(program_name: &str) {
    eprintln!("Usage: {} [--tokens | --ast] <file>", program_name);
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} samples/tour.hg            # Open the inspector",
        program_name
    );
    eprintln!(
        "  {} --tokens samples/tour.hg   # Print the token stream",
        program_name
    );
    eprintln!(
        "  {} --ast samples/tour.hg      # Print the statement outline",
        program_name
    );
}

fn report(error: &ParseError, file_name: &str, source: &str) -> ! {
    eprintln!(
        "{}",
        Diagnostic::from_parse_error(error, source).render(file_name, source)
    );
    std::process::exit(1);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("hedge");

    let mut mode = Mode::Inspect;
    let mut file = None;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--tokens" => mode = Mode::Tokens,
            "--ast" => mode = Mode::Ast,
            "-h" | "--help" => {
                usage(program_name);
                return Ok(());
            }
            flag if flag.starts_with("--") => {
                eprintln!("Error: Unknown option '{}'", flag);
                usage(program_name);
                std::process::exit(1);
            }
            path if file.is_none() => file = Some(path),
            extra => {
                eprintln!("Error: Unexpected argument '{}'", extra);
                usage(program_name);
                std::process::exit(1);
            }
        }
    }

    let Some(file) = file else {
        eprintln!("Error: No input file provided");
        eprintln!();
        usage(program_name);
        std::process::exit(1);
    };

    if !Path::new(file).exists() {
        eprintln!("Error: File '{}' not found", file);
        std::process::exit(1);
    }

    // Read source code
    let source = fs::read_to_string(file)?;

    match mode {
        Mode::Tokens => {
            let tokens =
                scan(&source).unwrap_or_else(|e| report(&ParseError::from(e), file, &source));
            for line in token_lines(&tokens) {
                println!("{}", line);
            }
        }
        Mode::Ast => {
            eprintln!("Parsing {}...", file);
            let program = Parser::from_source(&source)
                .and_then(|mut parser| parser.parse_program())
                .unwrap_or_else(|e| report(&e, file, &source));
            eprintln!(
                "Parsed successfully. Found {} top-level statements.",
                program.len()
            );
            println!("{}", render_outline(&outline(&program)));
        }
        Mode::Inspect => {
            eprintln!("Parsing {}...", file);
            let mut app = App::new(file, source);
            if app.inspection.problems.is_empty() {
                eprintln!(
                    "Parsed successfully. Found {} top-level statements.",
                    app.inspection.statement_count
                );
            } else {
                eprintln!(
                    "Found {} problem(s); opening the inspector anyway.",
                    app.inspection.problems.len()
                );
            }

            // Set up terminal
            enable_raw_mode()?;
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            let backend = CrosstermBackend::new(stdout);
            let mut terminal = Terminal::new(backend)?;

            let res = app.run(&mut terminal);

            // Restore terminal
            disable_raw_mode()?;
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            terminal.show_cursor()?;

            if let Err(err) = res {
                eprintln!("Error: {:?}", err);
            }
        }
    }

    Ok(())
}
