//! Entry point that configures a [`ConfigObject`] from a program's arguments.
//!
//! The command line is tokenized once, then matched twice: first against the
//! driver's own parameters (`-h`/`--help`), ignoring everything else, then
//! against the object, where every leftover key must be known. Configuration
//! files, if any, are bound before the command line so that explicit arguments
//! win.

use std::path::{Path, PathBuf};

use toml::Table;
use tracing::{debug, instrument};

use crate::{
    binder::{ConfigObject, Params},
    core::{ArgTreeError, Result},
    diagnostics::Diagnostics,
    matcher, source, tokenizer, usage,
};

#[derive(Default)]
struct Driver {
    help: bool,
}

impl ConfigObject for Driver {
    fn type_name(&self) -> &str {
        "Application"
    }

    fn description(&self) -> &str {
        "Command line parser of argtree"
    }

    fn declare<'a>(&'a mut self, params: &mut Params<'a>) {
        params.flag("help", Some('h'), &mut self.help, "Shows this help.");
    }
}

/// A successfully parsed command line.
#[derive(Debug, Clone)]
pub struct Application {
    binary: PathBuf,
    args: Vec<String>,
    help: bool,
    warnings: Diagnostics,
    usage: String,
}

impl Application {
    /// Parses `argv` and configures `object`.
    ///
    /// `argv[0]` is the program path, as in [`std::env::args`].
    ///
    /// # Errors
    ///
    /// Returns [`ArgTreeError::Rejected`] with every problem found if the
    /// command line cannot be bound, or a declaration error if `object`
    /// declares its parameters incorrectly.
    pub fn parse<O, I, S>(object: &mut O, argv: I) -> Result<Self>
    where
        O: ConfigObject + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ApplicationBuilder::new().parse(object, argv)
    }

    /// Starts a parse that also reads configuration files.
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    /// Path of the program, taken from the first argument.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Arguments that were not the value of any parameter, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether `-h` or `--help` was given.
    pub fn help_requested(&self) -> bool {
        self.help
    }

    /// Problems that did not prevent binding.
    pub fn warnings(&self) -> &Diagnostics {
        &self.warnings
    }

    /// Help text for the configured object, showing its declared defaults.
    pub fn usage(&self) -> &str {
        &self.usage
    }
}

/// Configures how [`Application`] parses.
#[derive(Debug, Clone, Default)]
pub struct ApplicationBuilder {
    config_files: Vec<PathBuf>,
    config_tables: Vec<Table>,
}

impl ApplicationBuilder {
    /// Creates a builder that only reads the command line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a configuration file. Files are applied in the order added,
    /// before the command line.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_files.push(path.into());
        self
    }

    /// Adds an already parsed configuration layer, applied after all files.
    pub fn config_table(mut self, table: Table) -> Self {
        self.config_tables.push(table);
        self
    }

    /// Parses `argv` and configures `object`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be loaded, if the
    /// object's declaration is invalid, or [`ArgTreeError::Rejected`] if the
    /// configuration files or the command line cannot be bound. The object is
    /// left untouched when matching fails, but values applied before an
    /// adapter refused another value are kept.
    #[instrument(skip_all)]
    pub fn parse<O, I, S>(self, object: &mut O, argv: I) -> Result<Application>
    where
        O: ConfigObject + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut argv = argv.into_iter();
        let binary = argv
            .next()
            .map(|arg| PathBuf::from(arg.as_ref()))
            .unwrap_or_default();

        let mut layers = Vec::with_capacity(self.config_files.len() + self.config_tables.len());
        for path in &self.config_files {
            layers.push(source::load_file(path)?);
        }
        layers.extend(self.config_tables);
        let file_table = source::merge_layers(layers);

        let mut tokenized = tokenizer::tokenize(argv);
        let mut diagnostics = tokenized.diagnostics;

        let mut driver = Driver::default();
        let mut driver_params = Params::declare(&mut driver)?;
        let mut params = Params::declare(object)?;

        let program = binary
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let usage = format!(
            "Usage: {program} [PARAM=VALUE]... [FILE]...\n\n{}{}",
            usage::render(&params),
            usage::render(&driver_params)
        );

        let (file_bound, file_diagnostics) = source::bind_table(params.registry(), &file_table);
        diagnostics.append(file_diagnostics);

        let (driver_bound, driver_diagnostics) = matcher::match_tree(
            driver_params.registry(),
            &mut tokenized.tree,
            &mut tokenized.tokens,
            true,
            "",
        );
        diagnostics.append(driver_diagnostics);

        let (bound, object_diagnostics) = matcher::match_tree(
            params.registry(),
            &mut tokenized.tree,
            &mut tokenized.tokens,
            false,
            "",
        );
        diagnostics.append(object_diagnostics);

        if diagnostics.has_errors() {
            debug!(count = diagnostics.len(), "command line rejected");
            return Err(ArgTreeError::Rejected(diagnostics));
        }
        debug_assert!(tokenized.tree.is_empty(), "unmatched keys after a clean match");

        diagnostics.append(driver_params.apply(&driver_bound));
        diagnostics.append(params.apply(&file_bound));
        diagnostics.append(params.apply(&bound));

        if diagnostics.has_errors() {
            debug!(count = diagnostics.len(), "values rejected");
            return Err(ArgTreeError::Rejected(diagnostics));
        }

        drop(driver_params);
        let args = tokenized.tokens.free_arguments();
        debug!(
            object = params.registry().type_name(),
            free = args.len(),
            warnings = diagnostics.len(),
            "configured from command line"
        );

        Ok(Application {
            binary,
            args,
            help: driver.help,
            warnings: diagnostics,
            usage,
        })
    }
}
