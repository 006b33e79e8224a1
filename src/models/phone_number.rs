use super::ClientId;

pub type PhoneId = i32;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    pub id: PhoneId,
    pub phone_num: String,
    pub client_id: ClientId,
}
