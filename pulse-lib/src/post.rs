use crate::sheet::{cell, Sheet};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Post {
    pub author: String,
    pub text: String,
    pub likes: u32,
    pub dislikes: u32,
}

impl Post {
    pub const WORKSHEET: &'static str = "Posts";
    pub const COLUMNS: [&'static str; 4] = ["author", "text", "likes", "dislikes"];

    pub fn new(author: &str, text: &str) -> Self {
        Self {
            author: author.to_string(),
            text: text.to_string(),
            likes: 0,
            dislikes: 0,
        }
    }

    pub fn empty_sheet() -> Sheet {
        Sheet::empty(&Self::COLUMNS)
    }

    pub fn from_cells(columns: &[String], cells: &[String]) -> Self {
        Self {
            author: cell(columns, cells, "author").to_string(),
            text: cell(columns, cells, "text").to_string(),
            likes: cell(columns, cells, "likes").parse().unwrap_or(0),
            dislikes: cell(columns, cells, "dislikes").parse().unwrap_or(0),
        }
    }

    pub fn to_cells(&self, columns: &[String]) -> Vec<String> {
        columns
            .iter()
            .map(|c| match c.as_str() {
                "author" => self.author.clone(),
                "text" => self.text.clone(),
                "likes" => self.likes.to_string(),
                "dislikes" => self.dislikes.to_string(),
                _ => String::new(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_and_round_trip() {
        let sheet = Post::empty_sheet();
        let post = Post::new("alice", "hello");
        let cells = post.to_cells(&sheet.columns);
        assert_eq!(cells, vec!["alice", "hello", "0", "0"]);
        assert_eq!(Post::from_cells(&sheet.columns, &cells), post);
    }

    #[test]
    fn unparsable_counters_read_as_zero() {
        let sheet = Post::empty_sheet();
        let cells = vec![
            "bob".to_string(),
            "hi".to_string(),
            "many".to_string(),
            "-3".to_string(),
        ];
        let post = Post::from_cells(&sheet.columns, &cells);
        assert_eq!(post.likes, 0);
        assert_eq!(post.dislikes, 0);
    }
}
