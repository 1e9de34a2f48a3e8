use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate};
use super::error::UserError;

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();
    type Error = UserError;

    /// Creates a new User from creation parameters.
    ///
    /// # Errors
    /// Rejects an empty name or an email without an `@`.
    fn from_create_params(id: String, params: UserCreate) -> Result<Self, UserError> {
        if params.name.trim().is_empty() {
            return Err(UserError::ValidationError("Name required".to_string()));
        }
        if !params.email.contains('@') {
            return Err(UserError::ValidationError(format!("Invalid email: {}", params.email)));
        }
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), UserError> {
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), UserError> {
        Ok(())
    }
}
