/// Criteria for choosing which table of a document to read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Criteria {
    /// CSS selector for the table; `None` or empty means pick the best table.
    pub selector: Option<String>,

    /// Position among the selector's matches. Without it, exactly one match is required.
    pub index: Option<usize>,
}

impl Criteria {
    /// Returns the selector if one was given and is not blank.
    pub(crate) fn explicit_selector(&self) -> Option<&str> {
        self.selector
            .as_deref()
            .map(str::trim)
            .filter(|selector| !selector.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_selector() {
        assert_eq!(Criteria::default().explicit_selector(), None);
        let criteria = Criteria { selector: Some("".to_owned()), index: None };
        assert_eq!(criteria.explicit_selector(), None);
        let criteria = Criteria { selector: Some(" #t ".to_owned()), index: Some(1) };
        assert_eq!(criteria.explicit_selector(), Some("#t"));
    }
}
