pub mod error;
pub mod feed;
pub mod identity;
pub mod post;
pub mod posting;
pub mod profile;
pub mod quote;
pub mod repo;
pub mod session;
pub mod sheet;

use crate::error::QuoteError;
use crate::feed::{compose_feed, RenderablePost};
use crate::identity::ResolveOutcome;
use crate::posting::SubmitOutcome;
use crate::profile::{AccountType, AvatarStyle};
use crate::quote::{HttpQuoteSource, QuoteSource};
use crate::repo::{PostRepository, ProfileRepository, SheetPosts, SheetProfiles};
use crate::session::Session;
use crate::sheet::SledSheetStore;
use std::path::Path;
use tokio::runtime::Runtime;

/// Blocking facade over the core operations, for callers without their own
/// async runtime (the terminal client). Owns the datastore handle, a tokio
/// runtime, and the current session.
pub struct Client {
    runtime: Runtime,
    profiles: SheetProfiles<SledSheetStore>,
    posts: SheetPosts<SledSheetStore>,
    quotes: HttpQuoteSource,
    session: Option<Session>,
}

impl Client {
    pub fn new<P: AsRef<Path>>(p: P, quote_endpoint: &str) -> anyhow::Result<Self> {
        let store = SledSheetStore::open(p)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        let client = Self {
            runtime,
            profiles: SheetProfiles::new(store.clone()),
            posts: SheetPosts::new(store),
            quotes: HttpQuoteSource::new(quote_endpoint)?,
            session: None,
        };

        Ok(client)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Login-or-register; on the register branch the caller has to enter
    /// again, exactly like the web surface.
    pub fn enter(
        &mut self,
        username: &str,
        account_type: AccountType,
    ) -> anyhow::Result<ResolveOutcome> {
        let outcome = self
            .runtime
            .block_on(identity::resolve(&self.profiles, username, account_type))?;
        if let ResolveOutcome::SignedIn(session) = &outcome {
            self.session = Some(session.clone());
        }
        Ok(outcome)
    }

    pub fn logout(&mut self) {
        self.session = None;
    }

    pub fn update_appearance(&self, pfp: &str, style: AvatarStyle) -> anyhow::Result<()> {
        let session = match &self.session {
            Some(s) => s,
            None => anyhow::bail!("not signed in"),
        };
        self.runtime.block_on(identity::update_appearance(
            &self.profiles,
            session,
            pfp,
            style,
        ))?;
        Ok(())
    }

    pub fn post(&self, text: &str) -> anyhow::Result<SubmitOutcome> {
        let author = self
            .session
            .as_ref()
            .map(|s| s.username.as_str())
            .unwrap_or("");
        let outcome = self
            .runtime
            .block_on(posting::submit_post(&self.posts, author, text))?;
        Ok(outcome)
    }

    /// Fresh read of both worksheets, joined into the renderable feed.
    pub fn feed(&self) -> anyhow::Result<Vec<RenderablePost>> {
        let (posts, profiles) = self.runtime.block_on(async {
            let posts = self.posts.all().await?;
            let profiles = self.profiles.all().await?;
            Ok::<_, crate::error::StoreError>((posts, profiles))
        })?;
        Ok(compose_feed(&posts, &profiles).collect())
    }

    pub fn quote(&self, symbol: &str) -> Result<f64, QuoteError> {
        self.runtime.block_on(self.quotes.last_price(symbol))
    }
}
