use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Meridiem {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Meridiem {
    /// Parse "am"/"pm" in any letter case.
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "AM" => Some(Meridiem::Am),
            "PM" => Some(Meridiem::Pm),
            _ => None,
        }
    }

    /// Meridiem of a 0-23 hour as it is shown back to the user.
    pub fn of_hour(hour: u32) -> Self {
        if hour < 12 { Meridiem::Am } else { Meridiem::Pm }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_any_case() {
        assert_eq!(Meridiem::from_input("am"), Some(Meridiem::Am));
        assert_eq!(Meridiem::from_input("Pm"), Some(Meridiem::Pm));
        assert_eq!(Meridiem::from_input("PM"), Some(Meridiem::Pm));
        assert_eq!(Meridiem::from_input("noon"), None);
        assert_eq!(Meridiem::from_input(""), None);
    }

    #[test]
    fn of_hour_splits_at_noon() {
        assert_eq!(Meridiem::of_hour(0), Meridiem::Am);
        assert_eq!(Meridiem::of_hour(11), Meridiem::Am);
        assert_eq!(Meridiem::of_hour(12), Meridiem::Pm);
        assert_eq!(Meridiem::of_hour(23), Meridiem::Pm);
    }
}
