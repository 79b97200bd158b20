use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;

use crate::auth;

#[derive(Debug, clap::Parser)]
pub struct DocumentsCli {
    #[command(subcommand)]
    pub subcommand: DocumentsSubcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum DocumentsSubcommand {
    /// List uploaded documents.
    List,
    /// Upload a document for processing.
    Upload(UploadArgs),
}

#[derive(Debug, clap::Parser)]
pub struct UploadArgs {
    pub path: PathBuf,

    /// Override the guessed MIME type.
    #[arg(long, value_name = "MIME")]
    pub content_type: Option<String>,
}

pub async fn run(cli: DocumentsCli) -> Result<()> {
    let client = auth::build_client()?;
    match cli.subcommand {
        DocumentsSubcommand::List => {
            let page = client.list_documents().await?;
            for document in &page.items {
                println!(
                    "{id}  {status:<10}  {name} ({size} bytes)",
                    id = document.id,
                    status = format!("{:?}", document.status).to_lowercase(),
                    name = document.filename,
                    size = document.size_bytes
                );
            }
            println!(
                "showing {count} of {total}",
                count = page.items.len(),
                total = page.total_count
            );
            Ok(())
        }
        DocumentsSubcommand::Upload(args) => {
            let UploadArgs { path, content_type } = args;
            let bytes =
                std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
            let filename = path
                .file_name()
                .and_then(std::ffi::OsStr::to_str)
                .context("path has no usable file name")?
                .to_string();
            let content_type = content_type.unwrap_or_else(|| {
                mime_guess::from_path(&path)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            });
            let document = client
                .upload_document(&filename, &content_type, bytes)
                .await?;
            println!(
                "uploaded {name} as {id} ({status:?})",
                name = document.filename,
                id = document.id,
                status = document.status
            );
            Ok(())
        }
    }
}
