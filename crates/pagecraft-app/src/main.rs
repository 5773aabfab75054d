//! Command-line entry point (native).

#[cfg(feature = "native")]
mod cli {
    use anyhow::{Context, Result};
    use clap::{Args, Parser, Subcommand, ValueEnum};
    use pagecraft_app::{BuilderCommand, Session};
    use pagecraft_core::export::json;
    use pagecraft_core::storage::{FileStorage, MemoryStorage, Storage, create_default_storage};
    use pagecraft_core::{ComponentStore, ExportFormat};
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Pagecraft - export page-builder designs to HTML, React and JSON
    #[derive(Parser, Debug)]
    #[command(name = "pagecraft")]
    #[command(author, version, about, long_about = None)]
    pub struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand, Debug)]
    enum Command {
        /// Export a saved design document
        Export {
            /// Design document (JSON array of components)
            design: PathBuf,

            #[command(flatten)]
            output: OutputArgs,
        },

        /// Apply a command script to an empty design and export the result
        Replay {
            /// Command script (JSON array of commands)
            script: PathBuf,

            /// Directory backing the save and load commands
            #[arg(long)]
            storage: Option<PathBuf>,

            #[command(flatten)]
            output: OutputArgs,
        },
    }

    #[derive(Args, Debug)]
    struct OutputArgs {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Artifact to write
        #[arg(short, long, value_enum, default_value_t = FormatArg::All)]
        format: FormatArg,
    }

    #[derive(Clone, Copy, Debug, ValueEnum)]
    enum FormatArg {
        Html,
        React,
        Json,
        All,
    }

    impl FormatArg {
        fn formats(self) -> Vec<ExportFormat> {
            match self {
                FormatArg::Html => vec![ExportFormat::Html],
                FormatArg::React => vec![ExportFormat::React],
                FormatArg::Json => vec![ExportFormat::Json],
                FormatArg::All => ExportFormat::ALL.to_vec(),
            }
        }
    }

    pub fn run(cli: Cli) -> Result<()> {
        match cli.command {
            Command::Export { design, output } => export(design, output),
            Command::Replay { script, storage, output } => replay(script, storage, output),
        }
    }

    fn export(design: PathBuf, output: OutputArgs) -> Result<()> {
        let source = fs::read_to_string(&design)
            .with_context(|| format!("Failed to read design {}", design.display()))?;
        let snapshot = json::from_json(&source)
            .with_context(|| format!("Invalid design document {}", design.display()))?;

        let mut session = Session::new(Arc::new(MemoryStorage::new()));
        session.store_mut().load_design(snapshot)?;
        write_artifacts(&session, &output)
    }

    fn replay(script: PathBuf, storage: Option<PathBuf>, output: OutputArgs) -> Result<()> {
        let source = fs::read_to_string(&script)
            .with_context(|| format!("Failed to read script {}", script.display()))?;
        let commands = BuilderCommand::parse_script(&source)
            .with_context(|| format!("Invalid command script {}", script.display()))?;

        let storage = match storage {
            Some(dir) => Arc::new(FileStorage::new(dir)?),
            None => create_default_storage()?,
        };
        log::info!("Using storage at {}", storage.base_path().display());

        let mut session = Session::with_store(ComponentStore::new(), storage);
        for (index, command) in commands.into_iter().enumerate() {
            let outcome = pollster::block_on(session.dispatch(command))
                .with_context(|| format!("Command {} failed", index + 1))?;
            log::debug!("Command {}: {:?}", index + 1, outcome);
        }
        log::info!(
            "Replayed script: {} components, history {}/{}",
            session.store().components().len(),
            session.store().cursor(),
            session.store().history_len() - 1
        );
        write_artifacts(&session, &output)
    }

    fn write_artifacts<S: Storage>(session: &Session<S>, output: &OutputArgs) -> Result<()> {
        fs::create_dir_all(&output.out)
            .with_context(|| format!("Failed to create {}", output.out.display()))?;
        for format in output.format.formats() {
            let artifact = session.export(format)?;
            let path = artifact
                .write_to(&output.out)
                .with_context(|| format!("Failed to write {}", artifact.file_name))?;
            println!("{}", path.display());
        }
        Ok(())
    }
}

#[cfg(feature = "native")]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    cli::run(cli::Cli::parse())
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
