//! Shows how a command line is interpreted against a schema description file.
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use argtree::{
    diagnostics::Diagnostics,
    matcher::{self, BoundConfiguration},
    schema::file::SchemaFile,
    source, tokenizer, tracing_config,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "argtree-inspect")]
#[command(about = "Inspect how argtree binds command lines and configuration files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize and match arguments, then print the bound configuration
    Bind {
        /// Schema description file (TOML)
        #[arg(short, long)]
        schema: PathBuf,
        /// Configuration files applied before the arguments, in order
        #[arg(short, long)]
        config: Vec<PathBuf>,
        /// Arguments to interpret, given after `--`
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Print the JSON Schema of the schema description format
    Schema,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_config::init()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Bind {
            schema,
            config,
            args,
        } => bind(&schema, &config, &args),
        Commands::Schema => {
            let schema = SchemaFile::json_schema()?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn bind(
    schema: &Path,
    config: &[PathBuf],
    args: &[String],
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let registry = SchemaFile::load(schema)?.into_registry()?;

    let mut diagnostics = Diagnostics::new();
    let mut files = BoundConfiguration::new();
    if !config.is_empty() {
        let table = source::load_layered(config)?;
        let (bound, file_diagnostics) = source::bind_table(&registry, &table);
        diagnostics.append(file_diagnostics);
        files = bound;
    }

    let mut tokenized = tokenizer::tokenize(args);
    diagnostics.append(tokenized.diagnostics);

    let (bound, matched) = matcher::match_tree(
        &registry,
        &mut tokenized.tree,
        &mut tokenized.tokens,
        false,
        "",
    );
    diagnostics.append(matched);

    if !files.is_empty() {
        println!("# from configuration files");
        println!("{}", source::to_toml_string(&files.to_toml())?);
    }
    println!("# from command line");
    println!("{}", source::to_toml_string(&bound.to_toml())?);

    println!("# free arguments");
    for arg in tokenized.tokens.free_arguments() {
        println!("{arg}");
    }

    for diagnostic in &diagnostics {
        let severity = if diagnostic.is_warning() { "warning" } else { "error" };
        eprintln!("{severity}: {diagnostic}");
    }

    if diagnostics.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
