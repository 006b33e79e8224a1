/// How `find_client` locates a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCriteria {
    /// Match on email, narrowed by whichever name parts are given.
    ByEmail {
        email: String,
        first_name: Option<String>,
        last_name: Option<String>,
    },
    /// Match any client owning this phone number.
    ByPhone { phone: String },
}

impl ClientCriteria {
    pub fn by_email(email: impl Into<String>) -> Self {
        ClientCriteria::ByEmail {
            email: email.into(),
            first_name: None,
            last_name: None,
        }
    }

    pub fn by_phone(phone: impl Into<String>) -> Self {
        ClientCriteria::ByPhone {
            phone: phone.into(),
        }
    }

    /// Narrow an email lookup by first name. No effect on phone lookups.
    pub fn with_first_name(mut self, value: impl Into<String>) -> Self {
        if let ClientCriteria::ByEmail { first_name, .. } = &mut self {
            *first_name = Some(value.into());
        }
        self
    }

    /// Narrow an email lookup by last name. No effect on phone lookups.
    pub fn with_last_name(mut self, value: impl Into<String>) -> Self {
        if let ClientCriteria::ByEmail { last_name, .. } = &mut self {
            *last_name = Some(value.into());
        }
        self
    }

    /// Pick the lookup mode from loose search fields.
    ///
    /// Email takes precedence over phone; names only count alongside an
    /// email. Returns `None` when neither email nor phone is given.
    pub fn from_fields(
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
    ) -> Option<Self> {
        match (email, phone) {
            (Some(email), _) => Some(ClientCriteria::ByEmail {
                email,
                first_name,
                last_name,
            }),
            (None, Some(phone)) => Some(ClientCriteria::ByPhone { phone }),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_wins_over_phone() {
        let criteria = ClientCriteria::from_fields(
            Some("Paul".into()),
            None,
            Some("kiss_band@gmail.com".into()),
            Some("89991112233".into()),
        );

        assert_eq!(
            criteria,
            Some(ClientCriteria::by_email("kiss_band@gmail.com").with_first_name("Paul"))
        );
    }

    #[test]
    fn phone_only_ignores_names() {
        let criteria = ClientCriteria::from_fields(
            Some("Paul".into()),
            Some("Stanley".into()),
            None,
            Some("89991112233".into()),
        );

        assert_eq!(criteria, Some(ClientCriteria::by_phone("89991112233")));
    }

    #[test]
    fn names_alone_select_nothing() {
        let criteria =
            ClientCriteria::from_fields(Some("Paul".into()), Some("Stanley".into()), None, None);

        assert_eq!(criteria, None);
    }

    #[test]
    fn name_narrowing_does_not_touch_phone_lookup() {
        let criteria = ClientCriteria::by_phone("89991112233").with_last_name("Stanley");

        assert_eq!(criteria, ClientCriteria::by_phone("89991112233"));
    }
}
