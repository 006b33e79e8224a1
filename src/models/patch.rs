use super::Client;

/// Partial update for a client. `None` leaves the stored value as it is.
///
/// Phone numbers are always rewritten as a whole: an unset `phones` means
/// "keep the current set", a set one replaces it entirely (an empty list
/// removes every number).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phones: Option<Vec<String>>,
}

impl ClientPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn phones<I, S>(mut self, phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phones = Some(phones.into_iter().map(Into::into).collect());
        self
    }

    /// True when nothing is set, i.e. applying it rewrites the same data.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phones.is_none()
    }

    /// Resolve the scalar fields against the current row.
    pub fn apply_to(&self, current: Client) -> Client {
        Client {
            id: current.id,
            first_name: self.first_name.clone().unwrap_or(current.first_name),
            last_name: self.last_name.clone().unwrap_or(current.last_name),
            email: self.email.clone().unwrap_or(current.email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn till() -> Client {
        Client {
            id: 2,
            first_name: "Till".into(),
            last_name: "Lindemann".into(),
            email: "rammstein@gmail.com".into(),
        }
    }

    #[test]
    fn unset_fields_keep_current_values() {
        let resolved = ClientPatch::new().email("lindemann@gmail.com").apply_to(till());

        assert_eq!(resolved.id, 2);
        assert_eq!(resolved.first_name, "Till");
        assert_eq!(resolved.last_name, "Lindemann");
        assert_eq!(resolved.email, "lindemann@gmail.com");
    }

    #[test]
    fn empty_patch_is_identity() {
        let patch = ClientPatch::new();

        assert!(patch.is_empty());
        assert_eq!(patch.apply_to(till()), till());
    }

    #[test]
    fn phones_only_patch_leaves_scalars_alone() {
        let patch = ClientPatch::new().phones(["84993331212"]);

        assert!(!patch.is_empty());
        assert_eq!(patch.phones.as_deref(), Some(&["84993331212".to_string()][..]));
        assert_eq!(patch.apply_to(till()), till());
    }
}
