//! Validated display names for houses and professionals.

use std::fmt;

/// Maximum length, in characters, of a stored name.
pub const NAME_MAX: usize = 255;

/// Validation errors raised when constructing a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameValidationError {
    /// The value was empty once trimmed.
    Empty,
    /// The value exceeded [`NAME_MAX`] characters.
    TooLong {
        /// Permitted maximum.
        max: usize,
    },
}

impl NameValidationError {
    /// Stable code reported in error details.
    pub fn code(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooLong { .. } => "too_long",
        }
    }
}

impl fmt::Display for NameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "must not be empty"),
            Self::TooLong { max } => write!(f, "must be at most {max} characters"),
        }
    }
}

impl std::error::Error for NameValidationError {}

fn normalise(raw: &str) -> Result<String, NameValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NameValidationError::Empty);
    }
    if trimmed.chars().count() > NAME_MAX {
        return Err(NameValidationError::TooLong { max: NAME_MAX });
    }
    Ok(trimmed.to_owned())
}

macro_rules! validated_name {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Trim and validate `raw`.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, NameValidationError> {
                normalise(raw.as_ref()).map(Self)
            }

            /// Borrow the validated value.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = NameValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

validated_name! {
    /// Project name carried by a house.
    ///
    /// # Examples
    /// ```
    /// use builders::domain::ProjectName;
    ///
    /// let name = ProjectName::new("  Riverside  ").expect("valid name");
    /// assert_eq!(name.as_str(), "Riverside");
    /// ```
    ProjectName
}

validated_name! {
    /// Name of an engineer or architect.
    ProfessionalName
}
