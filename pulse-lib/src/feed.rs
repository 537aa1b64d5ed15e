use crate::post::Post;
use crate::profile::{AvatarStyle, Profile};

/// One feed entry, ready for the presentation layer: post text joined with
/// its author's profile metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderablePost {
    pub author: String,
    pub display_name: String,
    pub avatar_url: String,
    pub style: AvatarStyle,
    pub verified: bool,
    pub text: String,
}

/// Join posts with their authors, most recent first. Insertion order is the
/// only ordering signal; there is no timestamp. Posts whose author has no
/// profile row are dropped, not errored. The iterator borrows its inputs and
/// can be rebuilt from fresh reads at any time.
pub fn compose_feed<'a>(
    posts: &'a [Post],
    profiles: &'a [Profile],
) -> impl Iterator<Item = RenderablePost> + 'a {
    posts.iter().rev().filter_map(move |post| {
        profiles
            .iter()
            .find(|p| p.username == post.author)
            .map(|p| RenderablePost {
                author: post.author.clone(),
                display_name: p.name.clone(),
                avatar_url: p.pfp.clone(),
                style: p.style,
                verified: p.verified,
                text: post.text.clone(),
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::AccountType;

    fn profile(username: &str) -> Profile {
        Profile::new(username, AccountType::Individual)
    }

    #[test]
    fn feed_is_reverse_insertion_order() {
        let profiles = vec![profile("alice"), profile("bob")];
        let posts = vec![
            Post::new("alice", "first"),
            Post::new("bob", "second"),
            Post::new("alice", "third"),
        ];
        let texts: Vec<String> = compose_feed(&posts, &profiles).map(|r| r.text).collect();
        assert_eq!(texts, vec!["third", "second", "first"]);
    }

    #[test]
    fn posts_without_an_author_profile_are_dropped() {
        let profiles = vec![profile("alice")];
        let posts = vec![Post::new("alice", "kept"), Post::new("ghost", "gone")];
        let feed: Vec<RenderablePost> = compose_feed(&posts, &profiles).collect();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].text, "kept");
    }

    #[test]
    fn output_matches_input_length_only_when_every_author_resolves() {
        let profiles = vec![profile("alice"), profile("bob")];
        let posts = vec![Post::new("alice", "a"), Post::new("bob", "b")];
        assert_eq!(compose_feed(&posts, &profiles).count(), posts.len());

        let with_orphan = vec![Post::new("alice", "a"), Post::new("ghost", "x")];
        assert!(compose_feed(&with_orphan, &profiles).count() < with_orphan.len());
    }

    #[test]
    fn entries_carry_the_author_profile_metadata() {
        let mut acme = Profile::new("acme", AccountType::Company);
        acme.name = "Acme Corp".to_string();
        acme.verified = true;
        acme.style = AvatarStyle::Square;
        acme.pfp = "https://cdn.example/acme.png".to_string();

        let posts = vec![Post::new("acme", "we shipped")];
        let profiles = vec![acme];
        let feed: Vec<RenderablePost> = compose_feed(&posts, &profiles).collect();
        assert_eq!(
            feed[0],
            RenderablePost {
                author: "acme".to_string(),
                display_name: "Acme Corp".to_string(),
                avatar_url: "https://cdn.example/acme.png".to_string(),
                style: AvatarStyle::Square,
                verified: true,
                text: "we shipped".to_string(),
            }
        );
    }

    #[test]
    fn restarting_the_composition_yields_the_same_sequence() {
        let profiles = vec![profile("alice")];
        let posts = vec![Post::new("alice", "one"), Post::new("alice", "two")];
        let a: Vec<RenderablePost> = compose_feed(&posts, &profiles).collect();
        let b: Vec<RenderablePost> = compose_feed(&posts, &profiles).collect();
        assert_eq!(a, b);
    }
}
