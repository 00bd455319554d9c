use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::models::user::{deserialize_secret_string, serialize_secret_string};

#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    #[serde(
        serialize_with = "serialize_secret_string",
        deserialize_with = "deserialize_secret_string"
    )]
    pub password: SecretString,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
