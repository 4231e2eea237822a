use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CityInputError {
    #[error("Sorry, input cannot be empty")]
    Empty,

    #[error("Invalid input '{0}'. Please enter a valid city name.")]
    Invalid(String),
}

/// A city name that passed input validation: letters and spaces only.
///
/// Provider calls take `&CityName`, so unchecked user input never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityName(String);

impl CityName {
    pub fn parse(input: &str) -> Result<Self, CityInputError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CityInputError::Empty);
        }

        let alphabetic = trimmed
            .chars()
            .filter(|c| *c != ' ')
            .all(char::is_alphabetic);

        if !alphabetic {
            return Err(CityInputError::Invalid(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for CityName {
    type Error = CityInputError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
