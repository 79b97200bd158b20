use anyhow::Result;
use anyhow::bail;
use tandem_protocol::RelationshipAction;
use uuid::Uuid;

use crate::auth;

#[derive(Debug, clap::Parser)]
pub struct RelationshipsCli {
    #[command(subcommand)]
    pub subcommand: RelationshipsSubcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum RelationshipsSubcommand {
    /// List coaching relationships.
    List,
    /// Answer a pending invitation.
    Respond(RespondArgs),
}

#[derive(Debug, clap::Parser)]
pub struct RespondArgs {
    pub id: Uuid,

    #[arg(long, conflicts_with = "decline")]
    pub accept: bool,

    #[arg(long)]
    pub decline: bool,
}

pub async fn run(cli: RelationshipsCli) -> Result<()> {
    let client = auth::build_client()?;
    match cli.subcommand {
        RelationshipsSubcommand::List => {
            let page = client.list_relationships().await?;
            for relationship in &page.items {
                println!(
                    "{id}  {status:<9}  {coach}",
                    id = relationship.id,
                    status = format!("{:?}", relationship.status).to_lowercase(),
                    coach = relationship.coach_name
                );
            }
            println!(
                "showing {count} of {total}",
                count = page.items.len(),
                total = page.total_count
            );
            Ok(())
        }
        RelationshipsSubcommand::Respond(args) => {
            let action = match (args.accept, args.decline) {
                (true, false) => RelationshipAction::Accept,
                (false, true) => RelationshipAction::Decline,
                _ => bail!("pass exactly one of --accept or --decline"),
            };
            let updated = client.respond_to_relationship(args.id, action).await?;
            println!(
                "{id}: {status:?}",
                id = updated.id,
                status = updated.status
            );
            Ok(())
        }
    }
}
