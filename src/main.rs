use std::io;
use std::path::PathBuf;

use clap::Parser as ClapParser;
use projql::cli::{CliError, OutputFormat, Session, delimiter_byte};
use projql::{Grammar, LoadOptions, load_csv};

#[derive(ClapParser)]
#[command(name = "projql")]
#[command(about = "projql - PROJECT and FILTER rows of a delimited text file")]
#[command(version)]
struct Cli {
    /// Delimited file to load; the first line is the header
    path: PathBuf,

    /// Field separator
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Strip surrounding whitespace from every cell
    #[arg(long)]
    trim: bool,

    /// Run a single query and exit instead of starting the prompt
    #[arg(short, long)]
    query: Option<String>,

    /// How to print result rows
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Never colour the output
    #[arg(long)]
    no_color: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let options = LoadOptions {
        delimiter: delimiter_byte(cli.delimiter)?,
        trim: cli.trim,
    };
    let dataset = load_csv(&cli.path, &options)?;

    let grammar = Grammar::new();
    let color = !cli.no_color && atty::is(atty::Stream::Stdout);
    let session = Session::new(&grammar, dataset)
        .with_format(cli.format)
        .with_color(color);

    match cli.query {
        Some(query) => {
            let output = session.run_query(&query)?;
            print!("{}", session.render(&output)?);
        }
        None => {
            let interactive = atty::is(atty::Stream::Stdin);
            if interactive {
                println!(
                    "Loaded {}. Type 'help' for the query syntax, 'exit' to leave.",
                    cli.path.display()
                );
            }
            session.repl(
                io::stdin().lock(),
                &mut io::stdout(),
                &mut io::stderr(),
                interactive,
            )?;
        }
    }
    Ok(())
}
