use anyhow::Result;
use charsel_core::character::CharacterCatalog;
use charsel_core::submission::SubmissionPayload;

use super::{identity, load_config};
use crate::SessionArgs;

pub async fn run(session: &SessionArgs, id: &str) -> Result<()> {
    let config = load_config(session).await?;
    let catalog = CharacterCatalog::builtin();
    let character = catalog.require(id)?;
    let identity = identity(session);
    let payload = SubmissionPayload::new(character, identity.as_ref(), &config.source);
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
