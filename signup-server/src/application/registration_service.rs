use std::sync::Arc;

use tracing::instrument;

use crate::data::user_repository::UserRepository;
use crate::domain::validation::validate_registration;
use crate::domain::{error::DomainError, user::User};
use crate::infrastructure::security::hash_password;
use crate::presentation::dto::RegistrationForm;

#[derive(Clone)]
pub struct RegistrationService<R: UserRepository + 'static> {
    repo: Arc<R>,
}

impl<R> RegistrationService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Validates the submission, hashes the password and appends the user.
    ///
    /// Nothing touches the store unless every rule passes.
    #[instrument(skip(self, form), fields(email = %form.email.trim()))]
    pub async fn register(&self, form: RegistrationForm) -> Result<User, DomainError> {
        let name = form.name.trim().to_string();
        let email = form.email.trim().to_string();

        validate_registration(&name, &email, &form.password, &form.confirm_password)
            .map_err(DomainError::Validation)?;

        let hash =
            hash_password(&form.password).map_err(|err| DomainError::Internal(err.to_string()))?;
        self.repo.append(User::new(name, email, hash)).await
    }
}
