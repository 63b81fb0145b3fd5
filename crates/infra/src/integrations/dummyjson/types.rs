//! Wire types for the DummyJSON users API

use serde::Deserialize;
use syncline_core::{DirectoryAddress, DirectoryUser};

/// Remote ids are numeric by convention but are carried as opaque strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum IdValue {
    Number(i64),
    Text(String),
}

impl IdValue {
    pub(crate) fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// User payload as returned by `GET /users/{id}`
#[derive(Debug, Deserialize)]
pub(crate) struct DirectoryUserDto {
    pub id: IdValue,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "birthDate")]
    pub birth_date: Option<String>,
    pub address: Option<AddressDto>,
}

/// Nested address object; the street line is itself named `address`
#[derive(Debug, Deserialize)]
pub(crate) struct AddressDto {
    pub address: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "postalCode")]
    pub postal_code: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Echo payload returned by `POST /users/add`
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedUserDto {
    pub id: IdValue,
}

impl From<DirectoryUserDto> for DirectoryUser {
    fn from(dto: DirectoryUserDto) -> Self {
        DirectoryUser {
            id: dto.id.into_string(),
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone: dto.phone,
            birth_date: dto.birth_date,
            address: dto.address.map(DirectoryAddress::from),
        }
    }
}

impl From<AddressDto> for DirectoryAddress {
    fn from(dto: AddressDto) -> Self {
        DirectoryAddress {
            street: dto.address,
            city: dto.city,
            postal_code: dto.postal_code,
            state: dto.state,
            country: dto.country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_both_parse() {
        let numeric: IdValue = serde_json::from_str("7").unwrap();
        assert_eq!(numeric.into_string(), "7");

        let text: IdValue = serde_json::from_str("\"abc-7\"").unwrap();
        assert_eq!(text.into_string(), "abc-7");
    }

    #[test]
    fn user_dto_maps_nested_address() {
        let body = r#"{
            "id": 1,
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "j@x.com",
            "phone": "+1",
            "birthDate": "1990-01-01",
            "address": {
                "address": "1 Main",
                "city": "Metropolis",
                "postalCode": "00001",
                "state": "NY",
                "country": "USA"
            }
        }"#;

        let dto: DirectoryUserDto = serde_json::from_str(body).unwrap();
        let user = DirectoryUser::from(dto);

        assert_eq!(user.id, "1");
        assert_eq!(user.first_name.as_deref(), Some("Jane"));
        let address = user.address.expect("address present");
        assert_eq!(address.street.as_deref(), Some("1 Main"));
        assert_eq!(address.postal_code.as_deref(), Some("00001"));
    }

    #[test]
    fn unknown_remote_fields_are_ignored() {
        let body = r#"{"id": 2, "firstName": "Sam", "age": 44, "gender": "male"}"#;
        let dto: DirectoryUserDto = serde_json::from_str(body).unwrap();
        let user = DirectoryUser::from(dto);

        assert_eq!(user.id, "2");
        assert!(user.address.is_none());
        assert!(user.birth_date.is_none());
    }
}
