/// Store-generated client identifier (SERIAL)
pub type ClientId = i32;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A client that has not been inserted yet, with its initial phone numbers
#[derive(Debug, Clone, Default)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phones: Vec<String>,
}

impl NewClient {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phones: Vec::new(),
        }
    }

    pub fn with_phones<I, S>(mut self, phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phones = phones.into_iter().map(Into::into).collect();
        self
    }
}
