use crate::error::StoreError;
use crate::post::Post;
use crate::profile::{AvatarStyle, Profile};
use crate::sheet::{Sheet, SheetConnection};
use async_trait::async_trait;

#[async_trait]
pub trait ProfileRepository {
    async fn all(&self) -> Result<Vec<Profile>, StoreError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Profile>, StoreError>;
    async fn append(&self, profile: Profile) -> Result<(), StoreError>;
    async fn update_appearance(
        &self,
        username: &str,
        pfp: &str,
        style: AvatarStyle,
    ) -> Result<(), StoreError>;
}

#[async_trait]
pub trait PostRepository {
    async fn all(&self) -> Result<Vec<Post>, StoreError>;
    async fn append(&self, post: Post) -> Result<(), StoreError>;
}

/// Profiles worksheet behind [`ProfileRepository`]. Every mutation is a full
/// read-modify-write of the worksheet; whether the store could do row-level
/// writes is not this layer's concern.
#[derive(Clone, Debug)]
pub struct SheetProfiles<C> {
    conn: C,
}

impl<C: SheetConnection> SheetProfiles<C> {
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    async fn sheet(&self) -> Result<Sheet, StoreError> {
        Ok(self
            .conn
            .read(Profile::WORKSHEET)
            .await?
            .unwrap_or_else(Profile::empty_sheet))
    }
}

#[async_trait]
impl<C: SheetConnection + Send + Sync> ProfileRepository for SheetProfiles<C> {
    async fn all(&self) -> Result<Vec<Profile>, StoreError> {
        let sheet = self.sheet().await?;
        Ok(sheet
            .rows
            .iter()
            .map(|row| Profile::from_cells(&sheet.columns, row))
            .collect())
    }

    // First match wins; username uniqueness is assumed, never enforced.
    async fn find_by_username(&self, username: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .find(|p| p.username == username))
    }

    async fn append(&self, profile: Profile) -> Result<(), StoreError> {
        let mut sheet = self.sheet().await?;
        let cells = profile.to_cells(&sheet.columns);
        sheet.rows.push(cells);
        self.conn.update(Profile::WORKSHEET, sheet).await
    }

    async fn update_appearance(
        &self,
        username: &str,
        pfp: &str,
        style: AvatarStyle,
    ) -> Result<(), StoreError> {
        let mut sheet = self.sheet().await?;
        let user_col = sheet.columns.iter().position(|c| c == "username");
        let pfp_col = sheet.columns.iter().position(|c| c == "pfp");
        let style_col = sheet.columns.iter().position(|c| c == "style");
        for row in &mut sheet.rows {
            let matches = user_col
                .and_then(|i| row.get(i))
                .map(|u| u == username)
                .unwrap_or(false);
            if !matches {
                continue;
            }
            if let Some(i) = pfp_col {
                if let Some(slot) = row.get_mut(i) {
                    *slot = pfp.to_string();
                }
            }
            if let Some(i) = style_col {
                if let Some(slot) = row.get_mut(i) {
                    *slot = style.as_cell().to_string();
                }
            }
        }
        // Zero matched rows is a silent no-op; the rewrite still happens.
        self.conn.update(Profile::WORKSHEET, sheet).await
    }
}

/// Posts worksheet behind [`PostRepository`]. Append-only; nothing edits or
/// deletes a post once written.
#[derive(Clone, Debug)]
pub struct SheetPosts<C> {
    conn: C,
}

impl<C: SheetConnection> SheetPosts<C> {
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C: SheetConnection + Send + Sync> PostRepository for SheetPosts<C> {
    async fn all(&self) -> Result<Vec<Post>, StoreError> {
        let sheet = self
            .conn
            .read(Post::WORKSHEET)
            .await?
            .unwrap_or_else(Post::empty_sheet);
        Ok(sheet
            .rows
            .iter()
            .map(|row| Post::from_cells(&sheet.columns, row))
            .collect())
    }

    async fn append(&self, post: Post) -> Result<(), StoreError> {
        let mut sheet = self
            .conn
            .read(Post::WORKSHEET)
            .await?
            .unwrap_or_else(Post::empty_sheet);
        let cells = post.to_cells(&sheet.columns);
        sheet.rows.push(cells);
        self.conn.update(Post::WORKSHEET, sheet).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::AccountType;
    use crate::sheet::MemorySheetStore;

    #[tokio::test]
    async fn append_starts_from_the_canonical_empty_sheet() {
        let store = MemorySheetStore::new();
        let profiles = SheetProfiles::new(store.clone());
        profiles
            .append(Profile::new("alice", AccountType::Individual))
            .await
            .unwrap();

        let sheet = store.read(Profile::WORKSHEET).await.unwrap().unwrap();
        assert_eq!(sheet.columns, Profile::empty_sheet().columns);
        assert_eq!(sheet.rows.len(), 1);
    }

    #[tokio::test]
    async fn find_by_username_takes_the_first_match() {
        let profiles = SheetProfiles::new(MemorySheetStore::new());
        let mut first = Profile::new("dup", AccountType::Individual);
        first.name = "first".to_string();
        let mut second = Profile::new("dup", AccountType::Company);
        second.name = "second".to_string();
        profiles.append(first).await.unwrap();
        profiles.append(second).await.unwrap();

        let found = profiles.find_by_username("dup").await.unwrap().unwrap();
        assert_eq!(found.name, "first");
    }

    #[tokio::test]
    async fn update_appearance_rewrites_matching_rows_in_place() {
        let profiles = SheetProfiles::new(MemorySheetStore::new());
        profiles
            .append(Profile::new("alice", AccountType::Individual))
            .await
            .unwrap();
        profiles
            .update_appearance("alice", "https://cdn.example/alice.png", AvatarStyle::Square)
            .await
            .unwrap();

        let alice = profiles.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(alice.pfp, "https://cdn.example/alice.png");
        assert_eq!(alice.style, AvatarStyle::Square);
    }

    #[tokio::test]
    async fn update_appearance_for_a_vanished_user_is_a_noop() {
        let profiles = SheetProfiles::new(MemorySheetStore::new());
        profiles
            .append(Profile::new("alice", AccountType::Individual))
            .await
            .unwrap();
        profiles
            .update_appearance("ghost", "x", AvatarStyle::Square)
            .await
            .unwrap();

        let alice = profiles.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(alice.style, AvatarStyle::Circle);
        assert!(profiles.find_by_username("ghost").await.unwrap().is_none());
    }
}
