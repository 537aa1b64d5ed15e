use crate::sheet::{cell, Sheet};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AVATAR: &str =
    "https://abs.twimg.com/sticky/default_profile_images/default_profile_400x400.png";

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum AccountType {
    Individual,
    Company,
}

impl AccountType {
    pub fn as_cell(&self) -> &'static str {
        match self {
            AccountType::Individual => "Individual",
            AccountType::Company => "Company",
        }
    }

    pub fn from_cell(s: &str) -> Self {
        if s == "Company" {
            AccountType::Company
        } else {
            AccountType::Individual
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum AvatarStyle {
    Circle,
    Square,
}

impl AvatarStyle {
    pub fn as_cell(&self) -> &'static str {
        match self {
            AvatarStyle::Circle => "Circle",
            AvatarStyle::Square => "Square",
        }
    }

    // Anything that is not literally "Circle" renders square.
    pub fn from_cell(s: &str) -> Self {
        if s == "Circle" {
            AvatarStyle::Circle
        } else {
            AvatarStyle::Square
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Profile {
    pub username: String,
    pub name: String,
    pub account_type: AccountType,
    pub verified: bool,
    pub style: AvatarStyle,
    pub pfp: String,
    pub bio: String,
}

impl Profile {
    pub const WORKSHEET: &'static str = "Profiles";
    pub const COLUMNS: [&'static str; 7] =
        ["username", "name", "type", "verified", "style", "pfp", "bio"];

    /// A freshly registered profile: display name mirrors the username,
    /// unverified, circle avatar, fixed placeholder picture, empty bio.
    pub fn new(username: &str, account_type: AccountType) -> Self {
        Self {
            username: username.to_string(),
            name: username.to_string(),
            account_type,
            verified: false,
            style: AvatarStyle::Circle,
            pfp: DEFAULT_AVATAR.to_string(),
            bio: String::new(),
        }
    }

    pub fn empty_sheet() -> Sheet {
        Sheet::empty(&Self::COLUMNS)
    }

    pub fn from_cells(columns: &[String], cells: &[String]) -> Self {
        Self {
            username: cell(columns, cells, "username").to_string(),
            name: cell(columns, cells, "name").to_string(),
            account_type: AccountType::from_cell(cell(columns, cells, "type")),
            verified: cell(columns, cells, "verified") == "True",
            style: AvatarStyle::from_cell(cell(columns, cells, "style")),
            pfp: cell(columns, cells, "pfp").to_string(),
            bio: cell(columns, cells, "bio").to_string(),
        }
    }

    /// Encode against the worksheet's own header so row content lines up
    /// with whatever column order the stored sheet already uses.
    pub fn to_cells(&self, columns: &[String]) -> Vec<String> {
        columns
            .iter()
            .map(|c| match c.as_str() {
                "username" => self.username.clone(),
                "name" => self.name.clone(),
                "type" => self.account_type.as_cell().to_string(),
                "verified" => if self.verified { "True" } else { "False" }.to_string(),
                "style" => self.style.as_cell().to_string(),
                "pfp" => self.pfp.clone(),
                "bio" => self.bio.clone(),
                _ => String::new(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_round_trip_through_canonical_columns() {
        let sheet = Profile::empty_sheet();
        let profile = Profile::new("quantum_ceo", AccountType::Company);
        let cells = profile.to_cells(&sheet.columns);
        assert_eq!(cells[0], "quantum_ceo");
        assert_eq!(cells[3], "False");
        assert_eq!(Profile::from_cells(&sheet.columns, &cells), profile);
    }

    #[test]
    fn decode_is_lenient_about_unknown_cell_values() {
        let sheet = Profile::empty_sheet();
        let cells = vec![
            "a".to_string(),
            "A".to_string(),
            "Martian".to_string(),
            "true".to_string(), // only the literal "True" counts
            "Blob".to_string(),
            "".to_string(),
            "".to_string(),
        ];
        let p = Profile::from_cells(&sheet.columns, &cells);
        assert_eq!(p.account_type, AccountType::Individual);
        assert!(!p.verified);
        assert_eq!(p.style, AvatarStyle::Square);
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let sheet = Profile::empty_sheet();
        let p = Profile::from_cells(&sheet.columns, &["bob".to_string()]);
        assert_eq!(p.username, "bob");
        assert_eq!(p.name, "");
        assert_eq!(p.pfp, "");
    }
}
