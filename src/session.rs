//! Identity provider contract and the explicit user session
//!
//! A [`Session`] owns the signed-in identity and is passed by reference to
//! whatever needs it. Interested parties register callbacks with
//! [`Session::subscribe`] and are told about every sign-in and sign-out.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AuthError, ProfileError, SessionError};
use crate::store::{Document, DocumentStore, UserDocument};

/// Minimum password length accepted by the hosted provider
pub const MIN_PASSWORD_LEN: usize = 6;

/// Authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

/// Contract of the hosted identity provider
pub trait IdentityProvider {
    /// Create an account and return its identity
    fn register(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Check credentials and return the matching identity
    fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// End the provider-side session
    fn end_session(&self) -> Result<(), AuthError>;

    /// Re-authenticate as `email` and move the account to `new_email`
    fn update_email(&self, email: &str, current_password: &str, new_email: &str) -> Result<Identity, AuthError>;

    /// Re-authenticate as `email` and replace its password
    fn update_password(&self, email: &str, current_password: &str, new_password: &str) -> Result<(), AuthError>;
}

struct Account {
    password: String,
    identity: Identity,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account").field("identity", &self.identity).finish_non_exhaustive()
    }
}

/// In-process identity provider for local runs and tests
///
/// Credentials live only in memory; this is a stand-in for the hosted
/// provider, not a credential store.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    next_uid: AtomicU64,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

fn failed(message: &str) -> AuthError {
    AuthError::AuthenticationFailed(message.to_string())
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(failed("invalid email"));
    }
    Ok(email)
}

fn check_password_strength(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(failed("password should be at least 6 characters"));
    }
    Ok(())
}

impl IdentityProvider for InMemoryIdentityProvider {
    fn register(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = normalize_email(email)?;
        check_password_strength(password)?;

        let mut accounts = self.accounts.write().map_err(|_| failed("provider unavailable"))?;
        if accounts.contains_key(&email) {
            return Err(failed("email already in use"));
        }

        let uid = format!("user-{}", self.next_uid.fetch_add(1, Ordering::Relaxed) + 1);
        let identity = Identity { uid, email: email.clone() };
        accounts.insert(
            email,
            Account {
                password: password.to_string(),
                identity: identity.clone(),
            },
        );
        Ok(identity)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = email.trim().to_lowercase();
        let accounts = self.accounts.read().map_err(|_| failed("provider unavailable"))?;
        match accounts.get(&email) {
            Some(account) if account.password == password => Ok(account.identity.clone()),
            _ => Err(failed("invalid credentials")),
        }
    }

    fn end_session(&self) -> Result<(), AuthError> {
        Ok(())
    }

    fn update_email(&self, email: &str, current_password: &str, new_email: &str) -> Result<Identity, AuthError> {
        let email = email.trim().to_lowercase();
        let new_email = normalize_email(new_email)?;
        let mut accounts = self.accounts.write().map_err(|_| failed("provider unavailable"))?;

        match accounts.get(&email) {
            Some(account) if account.password == current_password => {}
            _ => return Err(failed("invalid credentials")),
        }
        if new_email != email && accounts.contains_key(&new_email) {
            return Err(failed("email already in use"));
        }

        let mut account = accounts.remove(&email).ok_or_else(|| failed("invalid credentials"))?;
        account.identity.email = new_email.clone();
        let identity = account.identity.clone();
        accounts.insert(new_email, account);
        Ok(identity)
    }

    fn update_password(&self, email: &str, current_password: &str, new_password: &str) -> Result<(), AuthError> {
        let email = email.trim().to_lowercase();
        let mut accounts = self.accounts.write().map_err(|_| failed("provider unavailable"))?;

        let account = match accounts.get_mut(&email) {
            Some(account) if account.password == current_password => account,
            _ => return Err(failed("invalid credentials")),
        };
        check_password_strength(new_password)?;
        account.password = new_password.to_string();
        Ok(())
    }
}

/// Handle returned by [`Session::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(Option<&Identity>) + Send>;

/// The signed-in user, with change notifications
pub struct Session<P: IdentityProvider> {
    provider: P,
    current: Option<Identity>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<P: IdentityProvider> Session<P> {
    /// Signed-out session over `provider`
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            current: None,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn current_user(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    /// Create an account, sign in as it, and write its user document
    ///
    /// Once the provider has created the account the session is signed in,
    /// even when the document write then fails. The error is still returned;
    /// a later profile save recreates the missing document.
    pub fn register<S: DocumentStore + ?Sized>(
        &mut self,
        store: &S,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Identity, SessionError> {
        let identity = self.provider.register(email, password)?;
        info!("registered {}", identity.uid);
        self.set_current(Some(identity.clone()));

        store
            .create_document(&identity.uid, UserDocument::new(&identity.email, now).to_document()?)
            .inspect_err(|e| warn!("no user document for {}: {}", identity.uid, e))?;
        Ok(identity)
    }

    /// Sign in with existing credentials
    pub fn login(&mut self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = self
            .provider
            .authenticate(email, password)
            .inspect_err(|e| warn!("sign-in failed: {}", e))?;
        info!("signed in {}", identity.uid);
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    /// Sign out; a signed-out session stays signed out
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.provider.end_session()?;
        if self.current.is_some() {
            self.set_current(None);
        }
        Ok(())
    }

    /// Move the signed-in account to `new_email` after re-authenticating
    ///
    /// The stored document's `email` field follows the account.
    pub fn change_email<S: DocumentStore + ?Sized>(
        &mut self,
        store: &S,
        current_password: &str,
        new_email: &str,
    ) -> Result<Identity, ProfileError> {
        let current = self.current.as_ref().ok_or(ProfileError::NotSignedIn)?;
        let identity = self.provider.update_email(&current.email, current_password, new_email)?;
        info!("changed email of {}", identity.uid);
        self.set_current(Some(identity.clone()));

        let mut fields = Document::new();
        fields.insert("email".to_string(), Value::String(identity.email.clone()));
        store.update_fields(&identity.uid, fields)?;
        Ok(identity)
    }

    /// Replace the signed-in account's password after re-authenticating
    pub fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), ProfileError> {
        let current = self.current.as_ref().ok_or(ProfileError::NotSignedIn)?;
        if new_password != confirm_password {
            return Err(ProfileError::PasswordMismatch);
        }
        self.provider
            .update_password(&current.email, current_password, new_password)
            .inspect_err(|e| warn!("password change failed for {}: {}", current.uid, e))?;
        info!("changed password of {}", current.uid);
        Ok(())
    }

    /// Register a callback for identity changes
    ///
    /// The callback is invoked once right away with the current identity and
    /// then after every change.
    pub fn subscribe<F>(&mut self, mut listener: F) -> SubscriptionId
    where
        F: FnMut(Option<&Identity>) + Send + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        listener(self.current.as_ref());
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a callback; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn set_current(&mut self, identity: Option<Identity>) {
        self.current = identity;
        for (_, listener) in self.listeners.iter_mut() {
            listener(self.current.as_ref());
        }
    }
}

impl<P: IdentityProvider + std::fmt::Debug> std::fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("provider", &self.provider)
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
