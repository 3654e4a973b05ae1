//! Person service — the lender directory offered when creating rentals.
//!
//! Borrowers are never created here; the rental workflow creates them on
//! first use.

use lendstock_domain::error::LendError;
use lendstock_domain::person::Person;

use crate::ports::DataGateway;

/// Application service for lender lookup and registration.
pub struct PersonService<G> {
    gateway: G,
}

impl<G: DataGateway> PersonService<G> {
    /// Create a new service backed by the given gateway.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// List lenders, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn list_lenders(&self) -> Result<Vec<Person>, LendError> {
        self.gateway.list_lenders().await
    }

    /// Register a lender.
    ///
    /// # Errors
    ///
    /// Returns [`LendError::Validation`] when `name` is blank or `email` is
    /// malformed, or the gateway error.
    #[tracing::instrument(skip(self))]
    pub async fn register_lender(
        &self,
        name: &str,
        email: Option<&str>,
    ) -> Result<Person, LendError> {
        let email = email.map(str::trim).filter(|e| !e.is_empty());
        let lender = Person::lender(name.trim(), email.map(ToString::to_string));
        lender.validate()?;
        self.gateway.create_person(lender).await
    }

    /// Register every `(name, email)` pair whose trimmed name is not a
    /// lender yet, returning the lenders actually created.
    ///
    /// # Errors
    ///
    /// Stops at the first failing registration and returns its error.
    #[tracing::instrument(skip_all)]
    pub async fn seed_lenders<'a, I>(&self, seeds: I) -> Result<Vec<Person>, LendError>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut known: Vec<String> = self
            .list_lenders()
            .await?
            .into_iter()
            .map(|l| l.name)
            .collect();
        let mut created = Vec::new();
        for (name, email) in seeds {
            if known.iter().any(|k| k == name.trim()) {
                continue;
            }
            let lender = self.register_lender(name, email).await?;
            tracing::info!(lender_id = %lender.id, name = %lender.name, "lender registered");
            known.push(lender.name.clone());
            created.push(lender);
        }
        Ok(created)
    }
}
