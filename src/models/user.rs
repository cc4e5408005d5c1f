use serde::{Deserialize, Serialize};

use super::lenient;
use super::Record;
use crate::store::Collection;

/// Member of the mobile app, as stored in the `Users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppUser {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "firstName", default, deserialize_with = "lenient::string")]
    pub first_name: String,
    #[serde(rename = "lastName", default, deserialize_with = "lenient::string")]
    pub last_name: String,
    #[serde(rename = "userName", default, deserialize_with = "lenient::string")]
    pub user_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(rename = "phoneNumber", default, deserialize_with = "lenient::string")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub weight: Option<f64>,
    #[serde(rename = "profilePicture", default, deserialize_with = "lenient::opt_string")]
    pub profile_picture: Option<String>,
    #[serde(rename = "currentPackage", default, deserialize_with = "lenient::opt_string")]
    pub current_package: Option<String>,
}

impl AppUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Record for AppUser {
    const COLLECTION: Collection = Collection::Users;

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
