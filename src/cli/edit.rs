//! Edit command - changes an existing user through the form

use clap::Args;

use super::{find_user, finish, open_store, report_invalid, FieldArgs, GlobalArgs};
use crate::view::{SubmitOutcome, UserForm};

/// Arguments for the edit command
#[derive(Args, Clone, Debug)]
pub struct EditArgs {
    /// Id of the user to edit
    pub id: String,

    /// Fields to change; omitted ones keep their current value
    #[command(flatten)]
    pub fields: FieldArgs,
}

pub async fn run(global: &GlobalArgs, args: EditArgs) -> anyhow::Result<()> {
    let mut store = open_store(global).await?;
    let user = find_user(&store, &args.id)?;

    let mut form = UserForm::edit(&user);
    args.fields.fill(&mut form);

    match form.submit(&mut store).await {
        SubmitOutcome::Invalid => Err(report_invalid(&form)),
        SubmitOutcome::Done => {
            finish(&store)?;
            println!("Updated {}", user.id());
            Ok(())
        }
    }
}
