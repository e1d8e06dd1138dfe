// lolfront: LOLCODE lexer and parser front end

use std::fs;
use std::path::Path;

use log::{LevelFilter, Log, Metadata, Record};

use lolfront::parser::lexer::Lexer;
use lolfront::parser::render::render_program;
use lolfront::parser::Parser;

/// Writes every enabled record to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

struct Options {
    file: String,
    tokens: bool,
    render: bool,
    verbose: bool,
}

fn usage(program_name: &str) {
    eprintln!("Usage: {} <file.lol> [--tokens] [--render] [--verbose]", program_name);
    eprintln!();
    eprintln!("  --tokens   print the token stream before parsing");
    eprintln!("  --render   print the parsed program as canonical LOLCODE");
    eprintln!("  --verbose  log parser activity to stderr");
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut file = None;
    let mut options = Options {
        file: String::new(),
        tokens: false,
        render: false,
        verbose: false,
    };

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--tokens" => options.tokens = true,
            "--render" => options.render = true,
            "--verbose" => options.verbose = true,
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            path if file.is_none() => file = Some(path.to_string()),
            extra => return Err(format!("Unexpected argument '{}'", extra)),
        }
    }

    options.file = file.ok_or_else(|| "No input file provided".to_string())?;
    Ok(options)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("lolfront");

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            usage(program_name);
            std::process::exit(1);
        }
    };

    if options.verbose {
        log::set_logger(&LOGGER).map_err(|e| e.to_string())?;
        log::set_max_level(LevelFilter::Debug);
    }

    if !Path::new(&options.file).exists() {
        eprintln!("Error: File '{}' not found", options.file);
        std::process::exit(1);
    }

    let source = fs::read_to_string(&options.file)?;

    eprintln!("Parsing {}...", options.file);
    let tokens = match Lexer::new(&source, &options.file).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if options.tokens {
        for token in &tokens {
            println!("{:>5}  {}", token.location.line, token);
        }
    }

    let program = match Parser::new(&tokens).and_then(|mut parser| parser.parse_program()) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    eprintln!(
        "Parsed successfully. Found {} top-level statements.",
        program.body.len()
    );

    if options.render {
        print!("{}", render_program(&program));
    } else {
        println!("{:#?}", program);
    }

    Ok(())
}
