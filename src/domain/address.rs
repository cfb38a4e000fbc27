use serde::Serialize;

/// A reverse geocoded address. Any part may be missing.
#[derive(Clone, Default, Debug, PartialEq, Serialize)]
pub struct Address {
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub district: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    /// Human readable lines, skipping the parts that are unknown.
    pub fn lines(&self) -> Vec<String> {
        [
            join_present(&self.street, &self.street_number, ", "),
            self.district.clone(),
            join_present(&self.region, &self.postal_code, " - "),
            self.country.clone(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn join_present(first: &Option<String>, second: &Option<String>, separator: &str) -> Option<String> {
    match (first, second) {
        (Some(first), Some(second)) => Some(format!("{first}{separator}{second}")),
        (Some(value), None) | (None, Some(value)) => Some(value.clone()),
        (None, None) => None,
    }
}
