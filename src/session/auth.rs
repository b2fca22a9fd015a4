use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Decides whether a login or registration may open a session.
pub trait CredentialVerifier: Send {
    fn verify_login(&self, email: &str, password: &str) -> Result<(), AuthError>;
    fn verify_registration(&self, name: &str, email: &str, password: &str)
        -> Result<(), AuthError>;
}

/// Accepts any non-empty credentials. Nothing is checked against a stored
/// identity.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedVerifier;

fn require(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(())
    }
}

impl CredentialVerifier for SimulatedVerifier {
    fn verify_login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        require(email, "email")?;
        require(password, "password")?;
        info!(email = %email, "simulated login accepted");
        Ok(())
    }

    fn verify_registration(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        require(name, "name")?;
        require(email, "email")?;
        require(password, "password")?;
        info!(email = %email, "simulated registration accepted");
        Ok(())
    }
}
