//! Pure mapping between directory users and local contacts
//!
//! Both directions are plain functions of their input so they can be tested
//! without a repository or a network call.

use chrono::{NaiveDate, Utc};
use syncline_domain::{Contact, Result, SynclineError};
use uuid::Uuid;

use crate::directory_ports::{DirectoryUser, NewDirectoryUser};

/// Substituted for blank or absent payload fields on the outbound path.
/// The local id is never substituted.
pub const MISSING_FIELD_PLACEHOLDER: &str = "unknown";

/// Map a remote directory user onto a fresh local contact.
///
/// The remote id lands in `external_id` verbatim. `birth_date` must be
/// `YYYY-MM-DD` when present; a malformed value is a hard error for the
/// record. `last_synced_at` is left unset - only a successful outbound
/// push stamps it.
pub fn contact_from_directory_user(user: &DirectoryUser) -> Result<Contact> {
    let birthdate = user.birth_date.as_deref().map(parse_birth_date).transpose()?;

    let now = Utc::now().timestamp();
    let mut contact = Contact::new(Uuid::new_v4().to_string(), now);
    contact.first_name = user.first_name.clone();
    contact.last_name = user.last_name.clone();
    contact.email = user.email.clone();
    contact.phone = user.phone.clone();
    contact.birthdate = birthdate;
    contact.external_id = Some(user.id.clone());

    if let Some(address) = &user.address {
        contact.mailing_street = address.street.clone();
        contact.mailing_city = address.city.clone();
        contact.mailing_postal_code = address.postal_code.clone();
        contact.mailing_state = address.state.clone();
        contact.mailing_country = address.country.clone();
    }

    Ok(contact)
}

/// Build the outbound directory payload for a contact.
///
/// Blank or absent name/email/phone fields are replaced with
/// [`MISSING_FIELD_PLACEHOLDER`]; the local id is passed through verbatim.
pub fn directory_payload(contact: &Contact) -> NewDirectoryUser {
    NewDirectoryUser {
        id: contact.id.clone(),
        first_name: or_placeholder(contact.first_name.as_deref()),
        last_name: or_placeholder(contact.last_name.as_deref()),
        email: or_placeholder(contact.email.as_deref()),
        phone: or_placeholder(contact.phone.as_deref()),
    }
}

fn parse_birth_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| {
        SynclineError::InvalidInput(format!("unparsable birthDate '{raw}': {err}"))
    })
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => MISSING_FIELD_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory_ports::DirectoryAddress;

    fn sample_user() -> DirectoryUser {
        DirectoryUser {
            id: "1".into(),
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            email: Some("j@x.com".into()),
            phone: Some("+1".into()),
            birth_date: Some("1990-01-01".into()),
            address: Some(DirectoryAddress {
                street: Some("1 Main".into()),
                city: Some("Metropolis".into()),
                postal_code: Some("00001".into()),
                state: Some("NY".into()),
                country: Some("USA".into()),
            }),
        }
    }

    #[test]
    fn maps_all_fields_from_directory_user() {
        let contact = contact_from_directory_user(&sample_user()).unwrap();

        assert_eq!(contact.external_id.as_deref(), Some("1"));
        assert_eq!(contact.first_name.as_deref(), Some("Jane"));
        assert_eq!(contact.last_name.as_deref(), Some("Doe"));
        assert_eq!(contact.email.as_deref(), Some("j@x.com"));
        assert_eq!(contact.phone.as_deref(), Some("+1"));
        assert_eq!(contact.birthdate, NaiveDate::from_ymd_opt(1990, 1, 1));
        assert_eq!(contact.mailing_street.as_deref(), Some("1 Main"));
        assert_eq!(contact.mailing_city.as_deref(), Some("Metropolis"));
        assert_eq!(contact.mailing_postal_code.as_deref(), Some("00001"));
        assert_eq!(contact.mailing_state.as_deref(), Some("NY"));
        assert_eq!(contact.mailing_country.as_deref(), Some("USA"));
        assert!(contact.last_synced_at.is_none());
    }

    #[test]
    fn malformed_birth_date_is_a_hard_error() {
        let mut user = sample_user();
        user.birth_date = Some("01/01/1990".into());

        let err = contact_from_directory_user(&user).unwrap_err();
        assert!(matches!(err, SynclineError::InvalidInput(_)));
    }

    #[test]
    fn absent_birth_date_maps_to_none() {
        let mut user = sample_user();
        user.birth_date = None;

        let contact = contact_from_directory_user(&user).unwrap();
        assert!(contact.birthdate.is_none());
    }

    #[test]
    fn absent_address_leaves_mailing_fields_empty() {
        let mut user = sample_user();
        user.address = None;

        let contact = contact_from_directory_user(&user).unwrap();
        assert!(contact.mailing_street.is_none());
        assert!(contact.mailing_country.is_none());
    }

    #[test]
    fn payload_substitutes_placeholder_for_blank_fields() {
        let mut contact = Contact::new("c-42", 0);
        contact.first_name = Some("   ".into());
        contact.last_name = Some("Doe".into());
        contact.email = Some("j@x.com".into());
        contact.phone = None;

        let payload = directory_payload(&contact);
        assert_eq!(payload.id, "c-42");
        assert_eq!(payload.first_name, "unknown");
        assert_eq!(payload.last_name, "Doe");
        assert_eq!(payload.email, "j@x.com");
        assert_eq!(payload.phone, "unknown");
    }

    #[test]
    fn payload_serializes_with_camel_case_keys() {
        let mut contact = Contact::new("c-7", 0);
        contact.first_name = Some("Jane".into());

        let value = serde_json::to_value(directory_payload(&contact)).unwrap();
        assert_eq!(value["id"], "c-7");
        assert_eq!(value["firstName"], "Jane");
        assert_eq!(value["lastName"], "unknown");
        assert_eq!(value["email"], "unknown");
        assert_eq!(value["phone"], "unknown");
    }
}
