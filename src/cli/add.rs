//! Add command - creates a user through the form

use clap::Args;

use super::{finish, open_store, report_invalid, FieldArgs, GlobalArgs};
use crate::view::{SubmitOutcome, UserForm};

/// Arguments for the add command
#[derive(Args, Clone, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: FieldArgs,
}

pub async fn run(global: &GlobalArgs, args: AddArgs) -> anyhow::Result<()> {
    let mut store = open_store(global).await?;
    finish(&store)?;

    let mut form = UserForm::create();
    args.fields.fill(&mut form);

    match form.submit(&mut store).await {
        SubmitOutcome::Invalid => Err(report_invalid(&form)),
        SubmitOutcome::Done => {
            finish(&store)?;
            println!("User added ({} total)", store.len());
            Ok(())
        }
    }
}
