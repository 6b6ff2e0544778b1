//! List command - prints the directory, optionally filtered

use clap::Args;

use super::{finish, open_store, GlobalArgs};
use crate::view::ListView;

/// Arguments for the list command
#[derive(Args, Clone, Debug)]
pub struct ListArgs {
    /// Case-insensitive text to match against any field
    #[arg(long, short)]
    pub search: Option<String>,
}

/// Print the (filtered) user list
pub async fn run(global: &GlobalArgs, args: ListArgs) -> anyhow::Result<()> {
    let mut store = open_store(global).await?;
    finish(&store)?;

    if let Some(search) = args.search {
        store.set_search_text(search);
        store.flush_search();
    }

    print!("{}", ListView::from_store(&store));
    Ok(())
}
