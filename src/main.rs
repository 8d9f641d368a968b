use clap::{Args, Parser as ClapParser, Subcommand};
use infa_expr::cli::{self, CliError, EvalOptions};
use infa_expr::config::DEFAULT_MAX_DEPTH;
use infa_expr::{Config, FunctionRegistry};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "infa-expr")]
#[command(about = "infa-expr - Evaluate transformation-language formulas against typed variables")]
#[command(version)]
struct Cli {
    /// Log to stderr (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ExpressionArgs {
    /// The expression (reads from stdin if not provided)
    expression: Option<String>,

    /// Variable as NAME:TYPE=VALUE, TYPE one of NUMBER, STRING, NULL (repeatable)
    #[arg(long = "var", value_name = "NAME:TYPE=VALUE")]
    var: Vec<String>,

    /// Variables as a JSON array of {"name", "type", "value"} objects,
    /// applied before any --var
    #[arg(long = "vars", value_name = "JSON")]
    vars: Option<String>,

    /// Deepest nesting of parentheses and calls accepted
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression and print the result
    Eval(ExpressionArgs),

    /// Parse an expression and print its tree as JSON
    Parse {
        #[command(flatten)]
        args: ExpressionArgs,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the tokens of an expression
    Tokens {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,
    },

    /// List all functions, marking the implemented ones with '*'
    Functions,

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'infa-expr docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Eval(args) => {
            build_options(args, false).and_then(|options| cli::execute_eval(&options))
        }
        Commands::Parse { args, pretty } => {
            build_options(args, pretty).and_then(|options| cli::execute_parse(&options))
        }
        Commands::Tokens { expression } => read_expression(expression)
            .and_then(|expression| cli::execute_tokens(&expression))
            .map(|lines| lines.join("\n")),
        Commands::Functions => Ok(cli::list_functions(FunctionRegistry::builtin())
            .trim_end()
            .to_string()),
        Commands::Docs => Ok(cli::get_docs_overview().trim_end().to_string()),
        Commands::Doc { category } => {
            cli::get_doc_category(&category).map(|content| content.trim_end().to_string())
        }
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn build_options(args: ExpressionArgs, pretty: bool) -> Result<EvalOptions, CliError> {
    let mut variables = match &args.vars {
        Some(json) => cli::variables_from_json(json)?,
        None => Vec::new(),
    };
    for spec in &args.var {
        variables.push(cli::parse_variable_spec(spec)?);
    }

    Ok(EvalOptions {
        expression: read_expression(args.expression)?,
        variables,
        config: Config::default().with_max_depth(args.max_depth),
        pretty,
    })
}

fn read_expression(expression: Option<String>) -> Result<String, CliError> {
    match expression {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
        }
        None => Err(CliError::NoInput),
    }
}
