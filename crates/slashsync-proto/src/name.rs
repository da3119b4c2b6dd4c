//! Command and option name validation.
//!
//! Registries accept chat-input command names of 1 to 32 characters drawn
//! from lower-case letters, digits, `-` and `_`. Descriptions must be 1 to 100
//! characters.

/// Maximum length of a command or option name.
pub const MAX_NAME_LEN: usize = 32;

/// Maximum length of a command or option description.
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Maximum number of options on a single command.
pub const MAX_OPTIONS: usize = 25;

/// Extension trait for checking registry naming rules.
pub trait NameExt {
    /// Check if this string is a valid command or option name.
    ///
    /// # Examples
    ///
    /// ```
    /// use slashsync_proto::NameExt;
    ///
    /// assert!("roll".is_valid_command_name());
    /// assert!("set-topic".is_valid_command_name());
    /// assert!("dice_2".is_valid_command_name());
    ///
    /// assert!(!"".is_valid_command_name());      // Empty
    /// assert!(!"Roll".is_valid_command_name());  // Upper case
    /// assert!(!"two words".is_valid_command_name());
    /// ```
    fn is_valid_command_name(&self) -> bool;

    /// Reason this string is not a valid name, or `None` if it is.
    fn name_violation(&self) -> Option<&'static str>;

    /// Reason this string is not a valid description, or `None` if it is.
    fn description_violation(&self) -> Option<&'static str>;
}

#[inline]
fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'
}

impl NameExt for str {
    fn is_valid_command_name(&self) -> bool {
        self.name_violation().is_none()
    }

    fn name_violation(&self) -> Option<&'static str> {
        if self.is_empty() {
            return Some("name is empty");
        }
        if self.chars().count() > MAX_NAME_LEN {
            return Some("name is longer than 32 characters");
        }
        if !self.chars().all(is_name_char) {
            return Some("name may only contain lower-case letters, digits, '-' and '_'");
        }
        None
    }

    fn description_violation(&self) -> Option<&'static str> {
        if self.trim().is_empty() {
            return Some("description is empty");
        }
        if self.chars().count() > MAX_DESCRIPTION_LEN {
            return Some("description is longer than 100 characters");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!("ping".is_valid_command_name());
        assert!("a".is_valid_command_name());
        assert!("x-y_z9".is_valid_command_name());
        assert!("a".repeat(32).is_valid_command_name());
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!("".name_violation(), Some("name is empty"));
        assert!(!"a".repeat(33).is_valid_command_name());
        assert!(!"Ping".is_valid_command_name());
        assert!(!"ping!".is_valid_command_name());
        assert!(!"pi ng".is_valid_command_name());
    }

    #[test]
    fn test_descriptions() {
        assert_eq!("Roll dice".description_violation(), None);
        assert_eq!("   ".description_violation(), Some("description is empty"));
        assert!("d".repeat(101).description_violation().is_some());
        assert!("d".repeat(100).description_violation().is_none());
    }
}
