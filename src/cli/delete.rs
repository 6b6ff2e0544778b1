//! Delete command

use clap::Args;

use super::{find_user, finish, open_store, GlobalArgs};

/// Arguments for the delete command
#[derive(Args, Clone, Debug)]
pub struct DeleteArgs {
    /// Id of the user to delete
    pub id: String,
}

pub async fn run(global: &GlobalArgs, args: DeleteArgs) -> anyhow::Result<()> {
    let mut store = open_store(global).await?;
    let user = find_user(&store, &args.id)?;

    store.delete(&user).await;
    finish(&store)?;

    println!("Deleted {}", user.id());
    Ok(())
}
