//! CLI argument definitions using clap derive macros.

use std::path::{Path, PathBuf};

use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueHint};
use ichdl_common_config::{ConfigLoader, IchdlConfig};
use ichdl_common_log::{LogConfig, LogLevel};
use ichdl_generator::{GenerateOptions, Generator};
use ichdl_metadata::MetadataStore;
use ichdl_templates::{Language, TemplateKind, TemplateSet};
use tracing::debug;

use crate::commands::{
    DoctorCommand, GenerateAllCommand, GenerateCommand, ListCommand, ListSupportedCommand,
    TemplatesCommand, TestbenchAllCommand, TestbenchCommand,
};
use crate::error::{CliError, ErrorFormatter};
use crate::output::{ColorMode, Output};

/// Metadata file picked up from the project directory when nothing else is configured.
pub const MASTER_METADATA: &str = "Ic_Metadata_Master.json";

/// Generate Verilog and VHDL models of 74xx/4000-series ICs
///
/// Looks a part number up in the IC metadata catalog, picks a template and
/// writes the rendered module or testbench.
#[derive(Debug, Parser)]
#[command(
    name = "ic-hdl-gen",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "ICHDL_CONFIG",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// IC metadata JSON file (defaults to the built-in catalog)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub metadata: Option<PathBuf>,

    /// Directory holding hdl_templates/ and testbench_templates/
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub templates: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// When to use terminal colors
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub color: ColorMode,

    /// Stamp this text into generated files instead of the current time
    #[arg(long, global = true, value_name = "TEXT")]
    pub timestamp: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List parts in the metadata catalog
    List(ListCommand),

    /// Show which template each part resolves to
    ListSupported(ListSupportedCommand),

    /// Generate the HDL module for one part
    Generate(GenerateCommand),

    /// Generate HDL modules for every part
    GenerateAll(GenerateAllCommand),

    /// Generate the testbench for one part
    Testbench(TestbenchCommand),

    /// Generate testbenches for every part
    TestbenchAll(TestbenchAllCommand),

    /// List template files and the parts using them
    Templates(TemplatesCommand),

    /// Check metadata and templates for inconsistencies
    Doctor(DoctorCommand),

    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsCommand),
}

/// Shell completions generation
#[derive(Debug, Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

impl CompletionsCommand {
    pub fn execute(&self) -> Result<(), CliError> {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(self.shell, &mut cmd, name, &mut std::io::stdout());
        Ok(())
    }
}

impl Cli {
    /// Logging settings: environment first, then `-v` / `-q`.
    pub fn log_config(&self) -> LogConfig {
        let config = LogConfig::from_env().with_ansi(self.color.stderr());
        if self.verbose > 0 || self.quiet {
            config.with_level(LogLevel::from_verbosity(self.verbose, self.quiet))
        } else {
            config
        }
    }

    /// Load configuration from `--config` or the discovered project directory.
    pub fn load_config(&self) -> Result<(ConfigLoader, IchdlConfig), CliError> {
        match &self.config {
            Some(path) => {
                // Relative paths inside an explicit config resolve against its directory
                let dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                let loader = ConfigLoader::new(dir);
                let config = loader.load_file(path)?;
                Ok((loader, config))
            }
            None => {
                let cwd = std::env::current_dir()
                    .map_err(|e| CliError::io("cannot read the current directory", e))?;
                let loader = ConfigLoader::discover(&cwd);
                let config = loader.load()?;
                Ok((loader, config))
            }
        }
    }

    /// Execute the selected command
    pub fn run(&self) -> Result<(), CliError> {
        if let Command::Completions(cmd) = &self.command {
            return cmd.execute();
        }

        let (loader, config) = self.load_config()?;
        debug!(project = %loader.project_dir().display(), "configuration loaded");

        let ctx = CommandContext {
            config,
            loader,
            format: self.format,
            color: self.color,
            verbose: self.verbose,
            quiet: self.quiet,
            metadata: self.metadata.clone(),
            templates: self.templates.clone(),
            timestamp: self.timestamp.clone(),
        };

        match &self.command {
            Command::List(cmd) => cmd.execute(&ctx),
            Command::ListSupported(cmd) => cmd.execute(&ctx),
            Command::Generate(cmd) => cmd.execute(&ctx),
            Command::GenerateAll(cmd) => cmd.execute(&ctx),
            Command::Testbench(cmd) => cmd.execute(&ctx),
            Command::TestbenchAll(cmd) => cmd.execute(&ctx),
            Command::Templates(cmd) => cmd.execute(&ctx),
            Command::Doctor(cmd) => cmd.execute(&ctx),
            Command::Completions(cmd) => cmd.execute(),
        }
    }

    /// Print an error in the selected output format.
    pub fn report_error(&self, error: &CliError) {
        let formatter = ErrorFormatter::new()
            .color_mode(self.color)
            .verbose(self.verbose > 0);

        match self.format {
            OutputFormat::Json => eprintln!("{}", formatter.format_json(error)),
            OutputFormat::Text => formatter.print(error),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: IchdlConfig,
    pub loader: ConfigLoader,
    pub format: OutputFormat,
    pub color: ColorMode,
    pub verbose: u8,
    pub quiet: bool,
    pub metadata: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub timestamp: Option<String>,
}

impl CommandContext {
    /// Context for tests and embedding: defaults everywhere, rooted at `project_dir`.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            config: IchdlConfig::default(),
            loader: ConfigLoader::new(project_dir),
            format: OutputFormat::Text,
            color: ColorMode::Never,
            verbose: 0,
            quiet: false,
            metadata: None,
            templates: None,
            timestamp: None,
        }
    }

    pub fn output(&self) -> Output {
        Output::new(self)
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Metadata file to load: `--metadata`, then `paths.metadata`, then a
    /// master file in the project directory. `None` means the built-in catalog.
    pub fn metadata_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.metadata {
            return Some(path.clone());
        }
        if let Some(path) = &self.config.paths.metadata {
            return Some(self.loader.resolve(path));
        }
        let master = self.loader.project_dir().join(MASTER_METADATA);
        master.is_file().then_some(master)
    }

    /// Template root: `--templates`, then `paths.templates`, then the
    /// project directory if it has an `hdl_templates/` folder.
    pub fn template_root(&self) -> Option<PathBuf> {
        if let Some(path) = &self.templates {
            return Some(path.clone());
        }
        if let Some(path) = &self.config.paths.templates {
            return Some(self.loader.resolve(path));
        }
        let project = self.loader.project_dir();
        project
            .join(TemplateKind::Module.root_dir())
            .is_dir()
            .then(|| project.to_path_buf())
    }

    pub fn load_store(&self) -> Result<MetadataStore, CliError> {
        let store = match self.metadata_path() {
            Some(path) => MetadataStore::load(&path)?,
            None => MetadataStore::builtin()?,
        };
        debug!(source = %store.source(), parts = store.len(), "metadata loaded");
        Ok(store)
    }

    pub fn load_templates(&self) -> Result<TemplateSet, CliError> {
        let set = match self.template_root() {
            Some(root) => TemplateSet::from_dir(&root)?,
            None => TemplateSet::builtin(),
        };
        debug!(origin = %set.origin(), files = set.len(), "templates loaded");
        Ok(set)
    }

    /// Generation options from config, with `--timestamp` and `--fallback` on top.
    pub fn options(&self, fallback: bool) -> GenerateOptions {
        let mut options = GenerateOptions::from_config(&self.config);
        if let Some(timestamp) = &self.timestamp {
            options = options.with_timestamp(timestamp.clone());
        }
        if fallback {
            options = options.with_fallback(true);
        }
        options
    }

    pub fn generator(&self, fallback: bool) -> Result<Generator, CliError> {
        Ok(Generator::new(
            self.load_store()?,
            self.load_templates()?,
            self.options(fallback),
        ))
    }

    /// `--language`, else `generation.default_language`.
    pub fn language(&self, flag: Option<Language>) -> Result<Language, CliError> {
        match flag {
            Some(language) => Ok(language),
            None => self
                .config
                .generation
                .default_language
                .parse::<Language>()
                .map_err(|e| {
                    CliError::config_with_hint(
                        e.to_string(),
                        "set generation.default_language to verilog or vhdl",
                    )
                }),
        }
    }

    /// Directory for generated modules of `language`.
    pub fn module_dir(&self, language: Language, flag: Option<&Path>) -> PathBuf {
        match flag {
            Some(dir) => dir.to_path_buf(),
            None => {
                let configured = match language {
                    Language::Verilog => &self.config.output.verilog_dir,
                    Language::Vhdl => &self.config.output.vhdl_dir,
                };
                self.loader.resolve(configured)
            }
        }
    }

    /// Directory for generated testbenches.
    pub fn testbench_dir(&self, flag: Option<&Path>) -> PathBuf {
        match flag {
            Some(dir) => dir.to_path_buf(),
            None => self.loader.resolve(&self.config.output.testbench_dir),
        }
    }
}
