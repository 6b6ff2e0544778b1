//! Add/edit form for a single user
//!
//! Holds the five input buffers for one editing session plus the validity
//! flags shown next to each field. Nothing reaches the store until `submit`
//! sees a fully valid form; dropping the form abandons the session.

use crate::domain::user::{is_form_valid, FieldValidity, User, UserField, UserFields};

use super::store::UserStore;

pub const REQUIRED_FIELD: &str = "Required field";
pub const INVALID_EMAIL: &str = "Invalid email";
pub const FORM_INVALID: &str = "All fields must be filled in correctly";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Snapshot of the user being edited, taken when the form opened
    Edit(User),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Dispatched to the store; the caller should close the form
    Done,
    /// At least one field failed; flags and the aggregate message are set
    Invalid,
}

/// Display state of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldState<'a> {
    pub field: UserField,
    pub value: &'a str,
    pub is_valid: bool,
    pub error: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct UserForm {
    mode: FormMode,
    fields: UserFields,
    validity: FieldValidity,
    show_validation_error: bool,
}

impl UserForm {
    /// Empty form for a new user
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            fields: UserFields::default(),
            validity: FieldValidity::default(),
            show_validation_error: false,
        }
    }

    /// Form pre-filled from `user`; absent fields start empty
    pub fn edit(user: &User) -> Self {
        Self {
            mode: FormMode::Edit(user.clone()),
            fields: user.fields(),
            validity: FieldValidity::default(),
            show_validation_error: false,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New user",
            FormMode::Edit(_) => "Edit user",
        }
    }

    // Buffers

    pub fn value(&self, field: UserField) -> &str {
        self.fields.get(field)
    }

    /// Replace a buffer. Flags are only recomputed on submit.
    pub fn set_value(&mut self, field: UserField, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    pub fn fields(&self) -> &UserFields {
        &self.fields
    }

    // Validation state

    pub fn is_field_valid(&self, field: UserField) -> bool {
        self.validity.get(field)
    }

    /// Inline error for `field`, present only while its flag is false
    pub fn field_error(&self, field: UserField) -> Option<&'static str> {
        if self.validity.get(field) {
            return None;
        }

        Some(match field {
            UserField::Email => INVALID_EMAIL,
            _ => REQUIRED_FIELD,
        })
    }

    pub fn field_state(&self, field: UserField) -> FieldState<'_> {
        FieldState {
            field,
            value: self.value(field),
            is_valid: self.is_field_valid(field),
            error: self.field_error(field),
        }
    }

    /// Every field in form order
    pub fn field_states(&self) -> Vec<FieldState<'_>> {
        UserField::ALL
            .into_iter()
            .map(|field| self.field_state(field))
            .collect()
    }

    pub fn show_validation_error(&self) -> bool {
        self.show_validation_error
    }

    /// Aggregate message, shown after a failed submit
    pub fn validation_message(&self) -> Option<&'static str> {
        self.show_validation_error.then_some(FORM_INVALID)
    }

    /// Whether the current buffers would pass; drives the save button
    pub fn can_submit(&self) -> bool {
        is_form_valid(&self.fields)
    }

    /// Recompute every flag from the current buffers
    pub fn validate(&mut self) -> bool {
        self.validity = FieldValidity::check(&self.fields);
        let valid = self.validity.all_valid();
        self.show_validation_error = !valid;
        valid
    }

    /// Validate, then hand the fields to the store if they all pass
    pub async fn submit(&mut self, store: &mut UserStore) -> SubmitOutcome {
        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        let fields = self.fields.clone();
        match &self.mode {
            FormMode::Create => store.add_user(fields).await,
            FormMode::Edit(user) => store.update_user(user, fields).await,
        }

        SubmitOutcome::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;
    use crate::infrastructure::user::InMemoryUserRepository;
    use std::sync::Arc;
    use std::time::Duration;

    fn fill_valid(form: &mut UserForm) {
        form.set_value(UserField::Phone, "+79991234567");
        form.set_value(UserField::FirstName, "Иван");
        form.set_value(UserField::LastName, "Иванов");
        form.set_value(UserField::MiddleName, "Иванович");
        form.set_value(UserField::Email, "ivan@example.com");
    }

    async fn empty_store() -> UserStore {
        UserStore::load(
            Arc::new(InMemoryUserRepository::new()),
            Duration::from_millis(300),
        )
        .await
    }

    #[test]
    fn test_create_starts_empty_and_clean() {
        let form = UserForm::create();

        assert_eq!(form.title(), "New user");
        assert!(!form.is_editing());
        for state in form.field_states() {
            assert_eq!(state.value, "");
            assert!(state.is_valid);
            assert!(state.error.is_none());
        }
        assert!(!form.show_validation_error());
        assert!(!form.can_submit());
    }

    #[test]
    fn test_edit_prefills_and_blanks_absent_fields() {
        let user = User::blank(UserId::generate())
            .with_field(UserField::FirstName, "Anna")
            .with_field(UserField::Email, "anna@example.org");

        let form = UserForm::edit(&user);

        assert_eq!(form.title(), "Edit user");
        assert!(form.is_editing());
        assert_eq!(form.value(UserField::FirstName), "Anna");
        assert_eq!(form.value(UserField::Email), "anna@example.org");
        assert_eq!(form.value(UserField::Phone), "");
        assert_eq!(form.mode(), &FormMode::Edit(user));
    }

    #[test]
    fn test_typing_does_not_touch_flags() {
        let mut form = UserForm::create();
        form.set_value(UserField::Phone, "abc");

        assert!(form.is_field_valid(UserField::Phone));
        assert!(!form.can_submit());
    }

    #[tokio::test]
    async fn test_invalid_submit_flags_only_failing_fields() {
        let mut store = empty_store().await;
        let mut form = UserForm::create();
        fill_valid(&mut form);
        form.set_value(UserField::Phone, "12-34");
        form.set_value(UserField::Email, "ivan@example");

        let outcome = form.submit(&mut store).await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(form.show_validation_error());
        assert_eq!(form.validation_message(), Some(FORM_INVALID));
        assert_eq!(form.field_error(UserField::Phone), Some(REQUIRED_FIELD));
        assert_eq!(form.field_error(UserField::Email), Some(INVALID_EMAIL));
        assert!(form.is_field_valid(UserField::FirstName));
        assert!(form.is_field_valid(UserField::LastName));
        assert!(form.is_field_valid(UserField::MiddleName));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_resubmit_recomputes_flags() {
        let mut store = empty_store().await;
        let mut form = UserForm::create();

        assert_eq!(form.submit(&mut store).await, SubmitOutcome::Invalid);
        assert!(UserField::ALL.iter().all(|f| !form.is_field_valid(*f)));

        fill_valid(&mut form);
        form.set_value(UserField::LastName, "");
        assert_eq!(form.submit(&mut store).await, SubmitOutcome::Invalid);

        let failing: Vec<_> = UserField::ALL
            .into_iter()
            .filter(|f| !form.is_field_valid(*f))
            .collect();
        assert_eq!(failing, vec![UserField::LastName]);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_valid_create_submit_adds_user() {
        let mut store = empty_store().await;
        let mut form = UserForm::create();
        fill_valid(&mut form);
        assert!(form.can_submit());

        let outcome = form.submit(&mut store).await;

        assert_eq!(outcome, SubmitOutcome::Done);
        assert!(!form.show_validation_error());
        assert_eq!(store.len(), 1);
        assert_eq!(store.all_users()[0].fields(), *form.fields());
    }

    #[tokio::test]
    async fn test_valid_edit_submit_updates_user() {
        let mut store = empty_store().await;
        let mut create = UserForm::create();
        fill_valid(&mut create);
        create.submit(&mut store).await;
        let original = store.all_users()[0].clone();

        let mut form = UserForm::edit(&original);
        form.set_value(UserField::FirstName, "Пётр");
        let outcome = form.submit(&mut store).await;

        assert_eq!(outcome, SubmitOutcome::Done);
        let all = store.all_users();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id(), original.id());
        assert_eq!(all[0].first_name(), Some("Пётр"));
    }

    #[tokio::test]
    async fn test_abandoned_edit_writes_nothing() {
        let mut store = empty_store().await;
        let mut create = UserForm::create();
        fill_valid(&mut create);
        create.submit(&mut store).await;
        let original = store.all_users()[0].clone();

        let mut form = UserForm::edit(&original);
        form.set_value(UserField::FirstName, "Changed");
        drop(form);

        store.fetch_all().await;
        assert_eq!(store.all_users(), vec![original]);
    }
}
