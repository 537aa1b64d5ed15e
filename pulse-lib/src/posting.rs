use crate::error::StoreError;
use crate::post::Post;
use crate::repo::PostRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Posted,
    /// Empty author or empty text; the worksheet was not touched.
    Skipped,
}

/// Append one broadcast to the Posts worksheet. Blank input is swallowed as
/// a no-op rather than surfaced; counters start at zero and nothing in the
/// system ever increments them.
pub async fn submit_post(
    posts: &impl PostRepository,
    author_username: &str,
    text: &str,
) -> Result<SubmitOutcome, StoreError> {
    if author_username.is_empty() || text.is_empty() {
        return Ok(SubmitOutcome::Skipped);
    }
    posts.append(Post::new(author_username, text)).await?;
    Ok(SubmitOutcome::Posted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::SheetPosts;
    use crate::sheet::MemorySheetStore;

    #[tokio::test]
    async fn blank_author_and_blank_text_are_noops() {
        let posts = SheetPosts::new(MemorySheetStore::new());
        assert_eq!(
            submit_post(&posts, "", "x").await.unwrap(),
            SubmitOutcome::Skipped
        );
        assert_eq!(
            submit_post(&posts, "alice", "").await.unwrap(),
            SubmitOutcome::Skipped
        );
        assert!(posts.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn a_broadcast_lands_with_zeroed_counters() {
        let posts = SheetPosts::new(MemorySheetStore::new());
        assert_eq!(
            submit_post(&posts, "alice", "hello").await.unwrap(),
            SubmitOutcome::Posted
        );
        let stored = posts.all().await.unwrap();
        assert_eq!(stored, vec![Post::new("alice", "hello")]);
        assert_eq!(stored[0].likes, 0);
        assert_eq!(stored[0].dislikes, 0);
    }
}
