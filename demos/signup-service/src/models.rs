use errform::prelude::Validate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub address: Address,
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct Address {
    #[garde(length(min = 1, max = 100))]
    pub city: String,
    #[garde(length(min = 4, max = 10))]
    pub zip: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[garde(length(min = 1, max = 100))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(dive)]
    pub address: Address,
}
