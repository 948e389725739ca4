//! Seeded in-memory data for demos, the CLI and tests.
//!
//! The same options always produce the same users, entries and comments.
//! Entries are returned newest first.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use reel_contracts::repository::{CommentsProvider, FeedRepository, UserLookup};
use reel_model::{
    Comment, CommentId, Counters, EntryId, ModelResult, Uploader, UploaderId,
    VideoEntry, VideoKind,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reference "now" for generated timestamps (2024-06-01T00:00:00Z).
const FIXTURE_EPOCH_SECS: i64 = 1_717_200_000;

const COUNTRIES: [&str; 10] = [
    "USA", "Japan", "Brazil", "UK", "India", "Germany", "France", "Canada",
    "Australia", "Russia",
];
const TAGS: [&str; 10] = [
    "Lifestyle", "Gaming", "Music", "Dance", "Comedy", "Education", "Travel",
    "Tech", "Fashion", "Art",
];
const DESCRIPTIONS: [&str; 5] = [
    "Exploring the vibrant nightlife and neon-lit streets.",
    "A deep dive into the latest trends and styles.",
    "Capturing moments of pure joy and excitement.",
    "Unforgettable journey through stunning landscapes.",
    "Behind the scenes look at creating digital art.",
];

/// Shape of the generated data set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureOptions {
    pub seed: u64,
    pub users: usize,
    pub shorts: usize,
    pub longs: usize,
    /// Inclusive lower and exclusive upper bound of comments per entry.
    pub comments_per_entry: (usize, usize),
    pub media_base_url: String,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            users: 10,
            shorts: 10,
            longs: 10,
            comments_per_entry: (5, 20),
            media_base_url: "https://media.reel.test".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FixtureRepository {
    users: Vec<Uploader>,
    entries: Vec<VideoEntry>,
    comments: HashMap<EntryId, Vec<Comment>>,
}

impl FixtureRepository {
    /// Default data set with a custom seed.
    pub fn seeded(seed: u64) -> ModelResult<Self> {
        Self::generate(&FixtureOptions {
            seed,
            ..FixtureOptions::default()
        })
    }

    pub fn generate(options: &FixtureOptions) -> ModelResult<Self> {
        let mut rng = StdRng::seed_from_u64(options.seed);
        let now = DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(FIXTURE_EPOCH_SECS);
        let base = options.media_base_url.trim_end_matches('/');

        let users = (1..=options.users.max(1))
            .map(|n| {
                Ok(Uploader {
                    id: UploaderId::new(format!("user_{n}"))?,
                    display_name: format!("User {n}"),
                    avatar_url: format!("{base}/avatars/user_{n}.jpg"),
                })
            })
            .collect::<ModelResult<Vec<_>>>()?;

        let mut entries = Vec::with_capacity(options.longs + options.shorts);
        for i in 0..options.longs {
            let id = EntryId::new(format!("long_{}", i + 1))?;
            let entry = VideoEntry::new(id, VideoKind::Long, users[i % users.len()].id.clone())
                .with_title(format!("A Long Journey Part {}", i + 1))
                .with_description(DESCRIPTIONS[i % DESCRIPTIONS.len()])
                .with_media(
                    format!("{base}/long/{}.mp4", i + 1),
                    format!("{base}/long/{}.jpg", i + 1),
                )
                .with_counters(Counters {
                    likes: rng.random_range(0..10_000),
                    comments: rng.random_range(0..500),
                    shares: rng.random_range(0..1_000),
                })
                .with_created_at(now - Duration::seconds(rng.random_range(0..30 * 86_400)));
            entries.push(VideoEntry {
                country: COUNTRIES[i % COUNTRIES.len()].into(),
                tags: vec![
                    TAGS[i % TAGS.len()].into(),
                    TAGS[(i + 1) % TAGS.len()].into(),
                ],
                premium: i % 3 == 0,
                ..entry
            });
        }
        for i in 0..options.shorts {
            let id = EntryId::new(format!("short_{}", i + 1))?;
            let entry = VideoEntry::new(id, VideoKind::Short, users[i % users.len()].id.clone())
                .with_title(format!("Quick Clip #{}", i + 1))
                .with_description(format!(
                    "A quick look at something cool. {}",
                    DESCRIPTIONS[i % DESCRIPTIONS.len()]
                ))
                .with_media(
                    format!("{base}/shorts/{}.mp4", i + 1),
                    format!("{base}/shorts/{}.jpg", i + 1),
                )
                .with_counters(Counters {
                    likes: rng.random_range(0..5_000),
                    comments: rng.random_range(0..100),
                    shares: rng.random_range(0..500),
                })
                .with_created_at(now - Duration::seconds(rng.random_range(0..7 * 86_400)));
            entries.push(VideoEntry {
                country: COUNTRIES[(i + 5) % COUNTRIES.len()].into(),
                tags: vec![TAGS[(i + 2) % TAGS.len()].into()],
                premium: i % 4 == 0,
                ..entry
            });
        }
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let (low, high) = options.comments_per_entry;
        let high = high.max(low + 1);
        let mut comments = HashMap::with_capacity(entries.len());
        for entry in &entries {
            let count = rng.random_range(low..high);
            let mut thread: Vec<Comment> = Vec::with_capacity(count);
            for i in 0..count {
                // Replies only point at earlier comments, so threads are acyclic.
                let parent_id = (i > 1 && rng.random_bool(0.5))
                    .then(|| thread[rng.random_range(0..i - 1)].id.clone());
                thread.push(Comment {
                    id: CommentId::new(format!("comment_{}_{i}", entry.id))?,
                    entry_id: entry.id.clone(),
                    author_id: users[i % users.len()].id.clone(),
                    text: format!(
                        "This is an amazing video! Can't believe what I'm seeing. #{}",
                        i + 1
                    ),
                    parent_id,
                    upvotes: rng.random_range(0..200),
                    downvotes: rng.random_range(0..20),
                    created_at: now - Duration::seconds(rng.random_range(0..86_400)),
                });
            }
            comments.insert(entry.id.clone(), thread);
        }

        debug!(
            seed = options.seed,
            users = users.len(),
            entries = entries.len(),
            "generated fixtures"
        );
        Ok(Self {
            users,
            entries,
            comments,
        })
    }

    pub fn users(&self) -> &[Uploader] {
        &self.users
    }

    pub fn user(&self, id: &UploaderId) -> Option<&Uploader> {
        self.users.iter().find(|u| &u.id == id)
    }
}

impl FeedRepository for FixtureRepository {
    fn entries(&self) -> Vec<VideoEntry> {
        self.entries.clone()
    }
}

impl UserLookup for FixtureRepository {
    fn uploader(&self, entry_id: &EntryId) -> Option<Uploader> {
        let entry = self.entries.iter().find(|e| &e.id == entry_id)?;
        self.user(&entry.uploader_id).cloned()
    }
}

impl CommentsProvider for FixtureRepository {
    fn comments(&self, entry_id: &EntryId) -> Vec<Comment> {
        self.comments.get(entry_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::{CommentSort, CommentThread};

    #[test]
    fn same_seed_same_data() {
        let a = FixtureRepository::seeded(7).unwrap();
        let b = FixtureRepository::seeded(7).unwrap();
        assert_eq!(a.entries(), b.entries());

        let c = FixtureRepository::seeded(8).unwrap();
        assert_ne!(a.entries(), c.entries());
    }

    #[test]
    fn shorts_are_filtered_and_newest_first() {
        let repo = FixtureRepository::seeded(1).unwrap();
        let shorts = repo.short_entries();
        assert_eq!(shorts.len(), 10);
        assert!(shorts.iter().all(VideoEntry::is_short));
        assert!(shorts.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(repo.entries().len(), 20);
    }

    #[test]
    fn uploader_resolves_through_entry() {
        let repo = FixtureRepository::seeded(1).unwrap();
        let id = EntryId::new("short_3").unwrap();
        let uploader = repo.uploader(&id).unwrap();
        assert_eq!(uploader.id.as_str(), "user_3");
        assert!(repo.uploader(&EntryId::new("missing").unwrap()).is_none());
    }

    #[test]
    fn every_generated_comment_is_threaded() {
        let repo = FixtureRepository::seeded(3).unwrap();
        for entry in repo.entries() {
            let flat = repo.comments(&entry.id);
            assert!((5..20).contains(&flat.len()));
            let thread = CommentThread::build(entry.id.clone(), flat.clone(), CommentSort::Newest);
            assert_eq!(thread.len(), flat.len());
        }
    }

    #[test]
    fn empty_options_still_produce_a_user() {
        let repo = FixtureRepository::generate(&FixtureOptions {
            users: 0,
            shorts: 0,
            longs: 0,
            ..FixtureOptions::default()
        })
        .unwrap();
        assert_eq!(repo.users().len(), 1);
        assert!(repo.short_entries().is_empty());
    }
}
