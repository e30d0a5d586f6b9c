//! Profile fields of the signed-in user
//!
//! Email and password changes go through [`Session::change_email`] and
//! [`Session::change_password`]; this module covers the fields kept only in
//! the user's document.

use chrono::{DateTime, Utc};
use log::info;
use serde_json::Value;

use crate::error::ProfileError;
use crate::session::{IdentityProvider, Session};
use crate::store::{Document, DocumentStore, UserDocument};

/// Editable profile fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub display_name: String,
    pub phone_number: String,
    /// Hosted image URL; `None` keeps the stored one
    pub photo_url: Option<String>,
}

impl ProfileUpdate {
    /// Document fields written by this update
    pub fn to_fields(&self) -> Document {
        let mut fields = Document::new();
        fields.insert("displayName".to_string(), Value::String(self.display_name.clone()));
        fields.insert("phoneNumber".to_string(), Value::String(self.phone_number.clone()));
        if let Some(url) = self.photo_url.as_ref().filter(|url| !url.is_empty()) {
            fields.insert("photoURL".to_string(), Value::String(url.clone()));
        }
        fields
    }
}

/// The signed-in user's stored profile
///
/// A user without a stored document gets a fresh, unsaved one built from
/// the session identity.
pub fn load_profile<S, P>(store: &S, session: &Session<P>, now: DateTime<Utc>) -> Result<UserDocument, ProfileError>
where
    S: DocumentStore + ?Sized,
    P: IdentityProvider,
{
    let user = session.current_user().ok_or(ProfileError::NotSignedIn)?;
    match store.read_user(&user.uid)? {
        Some(profile) => Ok(profile),
        None => Ok(UserDocument::new(&user.email, now)),
    }
}

/// Write profile fields for the signed-in user
///
/// History arrays are untouched. A missing user document is created first.
pub fn save_profile<S, P>(
    store: &S,
    session: &Session<P>,
    update: &ProfileUpdate,
    now: DateTime<Utc>,
) -> Result<(), ProfileError>
where
    S: DocumentStore + ?Sized,
    P: IdentityProvider,
{
    let user = session.current_user().ok_or(ProfileError::NotSignedIn)?;
    if store.read_document(&user.uid)?.is_none() {
        store.create_document(&user.uid, UserDocument::new(&user.email, now).to_document()?)?;
        info!("recreated user document for {}", user.uid);
    }
    store.update_fields(&user.uid, update.to_fields())?;
    info!("saved profile for {}", user.uid);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{save_savings_calculation, SavingsCalculationRecord};
    use crate::projection::{project, ProjectionInput};
    use crate::session::InMemoryIdentityProvider;
    use crate::store::InMemoryDocumentStore;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn update(photo_url: Option<&str>) -> ProfileUpdate {
        ProfileUpdate {
            display_name: "Ada".to_string(),
            phone_number: "555-0100".to_string(),
            photo_url: photo_url.map(str::to_string),
        }
    }

    #[test]
    fn test_fields_skip_absent_photo() {
        let fields = update(None).to_fields();
        assert_eq!(fields["displayName"], "Ada");
        assert_eq!(fields["phoneNumber"], "555-0100");
        assert!(!fields.contains_key("photoURL"));
        assert!(!update(Some("")).to_fields().contains_key("photoURL"));
    }

    #[test]
    fn test_save_keeps_history() {
        let store = InMemoryDocumentStore::new();
        let mut session = Session::new(InMemoryIdentityProvider::new());
        session.register(&store, "ada@example.com", "secret1", at()).unwrap();

        let input = ProjectionInput::default();
        let record = SavingsCalculationRecord::new(&input, &project(&input).unwrap(), at());
        save_savings_calculation(&store, &session, &record).unwrap();

        save_profile(&store, &session, &update(Some("https://img.example.com/a.png")), at()).unwrap();
        // A later save without a new photo keeps the stored one
        save_profile(&store, &session, &update(None), at()).unwrap();

        let profile = load_profile(&store, &session, at()).unwrap();
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.display_name.as_deref(), Some("Ada"));
        assert_eq!(profile.phone_number.as_deref(), Some("555-0100"));
        assert_eq!(profile.photo_url.as_deref(), Some("https://img.example.com/a.png"));
        assert_eq!(profile.created_at.as_deref(), Some("2024-05-01T12:00:00.000Z"));
        assert_eq!(profile.savings_calculations, vec![record]);
    }

    #[test]
    fn test_missing_document_is_recreated() {
        let store = InMemoryDocumentStore::new();
        let provider = InMemoryIdentityProvider::new();
        provider.register("orphan@example.com", "secret1").unwrap();
        let mut session = Session::new(provider);
        let identity = session.login("orphan@example.com", "secret1").unwrap();

        let profile = load_profile(&store, &session, at()).unwrap();
        assert_eq!(profile.email, "orphan@example.com");
        assert!(store.is_empty());

        save_profile(&store, &session, &update(None), at()).unwrap();
        let stored = store.read_user(&identity.uid).unwrap().unwrap();
        assert_eq!(stored.display_name.as_deref(), Some("Ada"));
        assert!(stored.conversion_history.is_empty());
    }

    #[test]
    fn test_requires_sign_in() {
        let store = InMemoryDocumentStore::new();
        let session = Session::new(InMemoryIdentityProvider::new());

        assert!(matches!(load_profile(&store, &session, at()), Err(ProfileError::NotSignedIn)));
        assert!(matches!(
            save_profile(&store, &session, &update(None), at()),
            Err(ProfileError::NotSignedIn)
        ));
    }
}
