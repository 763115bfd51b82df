use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use docstore_handler::DocumentHandler;
use docstore_storage::{CancellationToken, Encoding};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docstore")]
#[command(about = "Store and fetch documents on a local or FTP backend", long_about = None)]
pub struct Cli {
    /// Configuration file (falls back to $DOCSTORE_CONFIG, then docstore.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether a file exists
    Exists { path: String },
    /// Check whether a directory exists
    DirExists { path: String },
    /// Create a directory and any missing parents
    Mkdir { path: String },
    /// Remove an empty directory
    Rmdir { path: String },
    /// Print a file's content
    Read(ReadArgs),
    /// Write a file, replacing any existing content
    Write(WriteArgs),
    /// Delete a file
    Delete { path: String },
    /// Copy a file within the backend
    Copy { source: String, destination: String },
}

#[derive(clap::Args, Debug)]
pub struct ReadArgs {
    pub path: String,

    /// Print as base64
    #[arg(long, conflicts_with = "text")]
    pub base64: bool,

    /// Decode as text
    #[arg(long)]
    pub text: bool,

    /// Text encoding label, e.g. windows-1252 (implies --text)
    #[arg(long)]
    pub encoding: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct WriteArgs {
    pub path: String,

    /// Local file to upload
    #[arg(long, conflicts_with = "text", required_unless_present = "text")]
    pub from: Option<PathBuf>,

    /// Literal UTF-8 content
    #[arg(long)]
    pub text: Option<String>,
}

pub async fn run(handler: &DocumentHandler, command: Commands, cancel: &CancellationToken) -> Result<()> {
    match command {
        Commands::Exists { path } => report(&path, handler.exists(&path, cancel).await?),
        Commands::DirExists { path } => report(&path, handler.directory_exists(&path, cancel).await?),
        Commands::Mkdir { path } => {
            handler.create_directory(&path, cancel).await?;
            done("Created", &path);
        }
        Commands::Rmdir { path } => {
            handler.delete_directory(&path, cancel).await?;
            done("Removed", &path);
        }
        Commands::Read(args) => read(handler, args, cancel).await?,
        Commands::Write(args) => {
            let data = match (args.text, args.from) {
                (Some(text), _) => text.into_bytes(),
                (None, Some(from)) => tokio::fs::read(&from)
                    .await
                    .with_context(|| format!("Failed to read {}", from.display()))?,
                (None, None) => bail!("Nothing to write: pass --from or --text"),
            };
            handler.write(&args.path, &data, cancel).await?;
            done("Wrote", &args.path);
        }
        Commands::Delete { path } => {
            handler.delete(&path, cancel).await?;
            done("Deleted", &path);
        }
        Commands::Copy { source, destination } => {
            handler.copy(&source, &destination, cancel).await?;
            done("Copied", &format!("{} → {}", source, destination));
        }
    }

    Ok(())
}

async fn read(handler: &DocumentHandler, args: ReadArgs, cancel: &CancellationToken) -> Result<()> {
    if args.base64 {
        println!("{}", handler.read_as_base64(&args.path, cancel).await?);
    } else if args.text || args.encoding.is_some() {
        let encoding = args.encoding.as_deref().map(resolve_encoding).transpose()?;
        print!("{}", handler.read_all_text(&args.path, encoding, cancel).await?);
    } else {
        let bytes = handler.read_all_bytes(&args.path, cancel).await?;
        std::io::stdout().write_all(&bytes)?;
    }

    Ok(())
}

fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.as_bytes()).with_context(|| format!("Unknown encoding: {}", label))
}

fn report(path: &str, found: bool) {
    if found {
        println!("  {} {}", "✓".green(), path.cyan());
    } else {
        println!("  {} {} not found", "✗".red(), path.cyan());
    }
}

fn done(action: &str, subject: &str) {
    println!("  {} {} {}", "✓".green(), action, subject.cyan());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_write_with_text() {
        let cli = Cli::parse_from(["docstore", "write", "notes/a.txt", "--text", "hello"]);
        match cli.command {
            Commands::Write(args) => {
                assert_eq!(args.path, "notes/a.txt");
                assert_eq!(args.text.as_deref(), Some("hello"));
                assert!(args.from.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_write_requires_a_source() {
        assert!(Cli::try_parse_from(["docstore", "write", "a.txt"]).is_err());
        assert!(Cli::try_parse_from(["docstore", "write", "a.txt", "--text", "x", "--from", "b"]).is_err());
    }

    #[test]
    fn test_read_modes_conflict() {
        assert!(Cli::try_parse_from(["docstore", "read", "a.txt", "--base64", "--text"]).is_err());

        let cli = Cli::parse_from(["docstore", "--config", "alt.toml", "read", "a.txt", "--base64"]);
        assert_eq!(cli.config.as_deref(), Some("alt.toml"));
    }

    #[test]
    fn test_resolve_encoding_labels() {
        assert_eq!(resolve_encoding("latin1").unwrap(), encoding_rs::WINDOWS_1252);
        assert!(resolve_encoding("no-such-encoding").is_err());
    }

    #[tokio::test]
    async fn test_run_against_local_handler() {
        let dir = tempfile::tempdir().unwrap();
        let settings = docstore_config::HandlerSettings::local(docstore_config::LocalSettings::new(
            dir.path().to_string_lossy(),
        ));
        let handler = DocumentHandler::new(&settings).unwrap();
        let cancel = CancellationToken::new();

        let write = Cli::parse_from(["docstore", "write", "in/a.txt", "--text", "f1"]).command;
        run(&handler, Commands::Mkdir { path: "in".into() }, &cancel).await.unwrap();
        run(&handler, write, &cancel).await.unwrap();
        run(
            &handler,
            Commands::Copy { source: "in/a.txt".into(), destination: "in/b.txt".into() },
            &cancel,
        )
        .await
        .unwrap();

        assert_eq!(std::fs::read(dir.path().join("in").join("b.txt")).unwrap(), b"f1");
    }
}
